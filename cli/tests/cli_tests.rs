#[test]
fn stat() {
    trycmd::TestCases::new()
        .case("tests/stat/*.toml")
        .env("RICHNESS_ALLOW_STDIN", "true")
        .default_bin_name("richness");
}
