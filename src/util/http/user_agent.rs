use rand::Rng;

const CHROME_VERSIONS: [&str; 10] = [
    "133.0.6943.50", "132.0.6834.83", "131.0.6778.85", "130.0.6723.92", "129.0.6668.70",
    "128.0.6613.120", "127.0.6533.88", "126.0.6478.126", "125.0.6422.141", "124.0.6367.201",
];

/// Generates a random desktop Chrome user agent string.
pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    let version = CHROME_VERSIONS[rng.random_range(0..CHROME_VERSIONS.len())];

    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        version
    )
}
