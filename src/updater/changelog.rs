//! Rendering the Debian changelog from its template

use crate::config::ChangelogConfig;
use crate::version::Version;
use chrono::{DateTime, FixedOffset, Utc};
use std::path::Path;

/// RFC 2822 style date as Debian changelogs expect it
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Current time in the configured fixed offset
pub fn release_date(config: &ChangelogConfig) -> crate::Result<DateTime<FixedOffset>> {
    let offset = config
        .utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            crate::Error::Config(format!(
                "utc_offset_hours {} is out of range",
                config.utc_offset_hours
            ))
        })?;
    Ok(Utc::now().with_timezone(&offset))
}

/// Fill the `@VERSION_STRING@`, `@DATE@`, `@AUTHOR@` and `@EMAIL@` placeholders
pub fn render(
    template: &str,
    version: &Version,
    date: &DateTime<FixedOffset>,
    config: &ChangelogConfig,
) -> String {
    template
        .replace("@VERSION_STRING@", &version.version_string())
        .replace("@DATE@", &date.format(DATE_FORMAT).to_string())
        .replace("@AUTHOR@", &config.author)
        .replace("@EMAIL@", &config.email)
}

/// Render `template_path` into `changelog_path`, dated now
pub fn update(
    template_path: &Path,
    changelog_path: &Path,
    version: &Version,
    config: &ChangelogConfig,
) -> crate::Result<()> {
    let template = crate::fsutil::read_to_string(template_path)?;
    let date = release_date(config)?;
    let rendered = render(&template, version, &date, config);
    crate::fsutil::write_atomic(changelog_path, &rendered)?;
    tracing::info!("Wrote {}", changelog_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TEMPLATE: &str = "\
clickhouse (@VERSION_STRING@) unstable; urgency=low

  * Modified source code

 -- @AUTHOR@ <@EMAIL@>  @DATE@
";

    fn fixed_date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2021, 10, 19, 15, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_render() {
        let version = Version::new(21, 11, 4, 14, 54456);
        let rendered = render(TEMPLATE, &version, &fixed_date(), &ChangelogConfig::default());
        assert_eq!(
            rendered,
            "\
clickhouse (21.11.4.14) unstable; urgency=low

  * Modified source code

 -- clickhouse-release <clickhouse-release@yandex-team.ru>  Tue, 19 Oct 2021 15:04:05 +0300
"
        );
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let version = Version::new(1, 2, 3, 4, 5);
        let rendered = render(
            "@VERSION_STRING@ @VERSION_STRING@",
            &version,
            &fixed_date(),
            &ChangelogConfig::default(),
        );
        assert_eq!(rendered, "1.2.3.4 1.2.3.4");
    }

    #[test]
    fn test_release_date_offset() {
        let config = ChangelogConfig {
            utc_offset_hours: -5,
            ..Default::default()
        };
        let date = release_date(&config).unwrap();
        assert_eq!(date.offset().local_minus_utc(), -5 * 3600);
        assert!(date.format(DATE_FORMAT).to_string().ends_with("-0500"));
    }

    #[test]
    fn test_release_date_rejects_bad_offset() {
        let config = ChangelogConfig {
            utc_offset_hours: 30,
            ..Default::default()
        };
        assert!(release_date(&config).is_err());
    }

    #[test]
    fn test_update_writes_changelog() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("changelog.in");
        let changelog = dir.path().join("changelog");
        std::fs::write(&template, TEMPLATE).unwrap();

        let version = Version::new(21, 12, 1, 9174, 54458);
        update(&template, &changelog, &version, &ChangelogConfig::default()).unwrap();

        let written = std::fs::read_to_string(&changelog).unwrap();
        assert!(written.starts_with("clickhouse (21.12.1.9174) unstable"));
        assert!(written.contains("+0300"));
        for placeholder in ["@VERSION_STRING@", "@DATE@", "@AUTHOR@", "@EMAIL@"] {
            assert!(!written.contains(placeholder), "{placeholder} left in changelog");
        }
        // Template is left alone
        assert_eq!(std::fs::read_to_string(&template).unwrap(), TEMPLATE);
    }
}
