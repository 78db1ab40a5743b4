// Sample with well-formed markers.

// [START hello_world]
fn main() {
    println!("Hello, world!");
}
// [END hello_world]

// [START config_defaults]
const RETRIES: u32 = 3;
// [END config_defaults]
