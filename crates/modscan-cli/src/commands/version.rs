use miette::Result;
use modscan_core::{REPORT_SCHEMA_VERSION, VERSION};

/// Commit the binary was built from, when the build sets it.
const GIT_HASH: Option<&str> = option_env!("MODSCAN_BUILD_GIT_HASH");

pub fn run(json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "version": VERSION,
                "report_schema_version": REPORT_SCHEMA_VERSION,
                "git_hash": GIT_HASH,
            })
        );
    } else {
        println!("{}", version_line(GIT_HASH));
    }
    Ok(())
}

/// `modscan 0.2.0 (report schema v1)`, with the commit appended if known.
fn version_line(git_hash: Option<&str>) -> String {
    let mut line = format!("modscan {VERSION} (report schema v{REPORT_SCHEMA_VERSION})");
    if let Some(hash) = git_hash {
        line.push_str(", ");
        line.push_str(hash);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        assert_eq!(
            version_line(None),
            format!("modscan {VERSION} (report schema v{REPORT_SCHEMA_VERSION})")
        );
        assert!(version_line(Some("abc1234")).ends_with(", abc1234"));
    }
}
