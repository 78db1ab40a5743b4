// Tag "auth" here is a substring of "auth_retry" in ambiguous_b.py.

// [START auth]
let session = login(user, pass)?;
// [END auth]
