use std::process::Command;
use std::str;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--broken"])
        .current_dir(env!("CARGO_MANIFEST_DIR")) // Run git in the project root
        .output();

    let git_tag = match output {
        Ok(output) if output.status.success() => str::from_utf8(&output.stdout)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
        Ok(output) => {
            eprintln!("WARNING: git describe failed: {:?}", output.stderr);
            "unknown".to_string()
        }
        // Fallback for when git isn't available at all
        Err(err) => {
            eprintln!("WARNING: could not run git: {err}");
            "unknown".to_string()
        }
    };

    println!("cargo:rustc-env=GIT_TAG={git_tag}");
}
