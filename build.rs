fn main() {
    // Stamp the build date into the binary for the startup banner
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=VCPANEL_BUILD_DATE={}", build_date);
}
