use vergen::EmitBuilder;

// Emits build and git metadata consumed by the startup banner.
// Git information is best-effort so tarball builds still succeed.
fn main() {
    if let Err(e) = EmitBuilder::builder().all_build().all_git().emit() {
        println!("cargo:warning=vergen: {e}");
    }
}
