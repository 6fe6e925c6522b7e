//! Rendered release body.

use release_drafter::{NotesContext, ReleaseNotes, ReleaseSettings, ReleaseVersion, RepoSlug};

fn render(version: &str, changelog: &[&str], settings: &ReleaseSettings) -> String {
    let context = NotesContext::new(
        &ReleaseVersion::new(version),
        &RepoSlug::parse("sigp/lighthouse").expect("slug"),
        "sigp/lighthouse",
        settings.project_or("lighthouse"),
        changelog.iter().map(|s| s.to_string()).collect(),
        settings,
    );
    ReleaseNotes::new()
        .expect("template compiles")
        .render(&context)
        .expect("render")
}

/// Lines between `## <title>` and the next `## ` heading
fn section<'a>(body: &'a str, title: &str) -> Vec<&'a str> {
    let heading = format!("## {}", title);
    body.lines()
        .skip_while(|l| l.trim() != heading)
        .skip(1)
        .take_while(|l| !l.starts_with("## "))
        .filter(|l| !l.trim().is_empty())
        .collect()
}

#[test]
fn changelog_lines_appear_under_all_changes() {
    let body = render(
        "v1.2.3",
        &["- fix bug", "- add feature"],
        &ReleaseSettings::default(),
    );

    assert_eq!(section(&body, "All Changes"), vec!["- fix bug", "- add feature"]);
}

#[test]
fn version_fills_every_placeholder() {
    let body = render("v1.2.3", &[], &ReleaseSettings::default());

    assert!(!body.contains("{{"));
    assert!(body.contains("releases/download/v1.2.3/lighthouse-v1.2.3-x86_64-apple-darwin.tar.gz"));
    assert!(body.contains("[v1.2.3](https://hub.docker.com/r/sigp/lighthouse/tags?page=1&ordering=last_updated&name=v1.2.3)"));

    // Four platforms, each naming the version in archive, archive URL and signature URL
    assert!(body.matches("v1.2.3").count() >= 4 * 4);
}

#[test]
fn sections_appear_in_order() {
    let body = render("v1.2.3", &["- x"], &ReleaseSettings::default());
    let order = [
        "## Testing Checklist (DELETE ME)",
        "## Release Checklist (DELETE ME)",
        "## Summary",
        "## Update Priority",
        "## All Changes",
        "## Binaries",
    ];

    let positions: Vec<usize> = order
        .iter()
        .map(|h| body.find(h).unwrap_or_else(|| panic!("missing {h}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn checklists_render_as_task_items() {
    let settings = ReleaseSettings {
        testing_checklist: vec!["Run on a synced node.".to_string()],
        release_checklist: vec!["Publish images.".to_string(), "Announce.".to_string()],
        ..ReleaseSettings::default()
    };
    let body = render("v1.2.3", &[], &settings);

    assert_eq!(
        section(&body, "Testing Checklist (DELETE ME)"),
        vec!["- [ ] Run on a synced node."]
    );
    assert_eq!(
        section(&body, "Release Checklist (DELETE ME)"),
        vec!["- [ ] Publish images.", "- [ ] Announce."]
    );
}

#[test]
fn binaries_table_follows_platform_settings() {
    let settings = ReleaseSettings {
        project: "beacon".to_string(),
        pgp_fingerprint: "15E66D941F697E28F49381F426416DC3F30674B0".to_string(),
        platforms: vec![release_drafter::PlatformBinary {
            system: "Linux".to_string(),
            icon: "https://simpleicons.org/icons/linux.svg".to_string(),
            arch: "riscv64".to_string(),
            target: "riscv64gc-unknown-linux-gnu".to_string(),
        }],
        ..ReleaseSettings::default()
    };
    let body = render("v2.0.0", &[], &settings);
    let binaries = section(&body, "Binaries");

    assert!(binaries.iter().any(|l| l.contains("`15E66D941F697E28F49381F426416DC3F30674B0`")));
    let rows: Vec<_> = binaries.iter().filter(|l| l.contains(".tar.gz")).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("| riscv64 |"));
    assert!(rows[0].contains("[beacon-v2.0.0-riscv64gc-unknown-linux-gnu.tar.gz]"));
    assert!(rows[0].contains("beacon-v2.0.0-riscv64gc-unknown-linux-gnu.tar.gz.asc)"));
    assert!(binaries.iter().any(|l| l.contains("| Docker |")));
}

#[test]
fn optional_links_are_omitted_when_blank() {
    let body = render("v1.2.3", &[], &ReleaseSettings::default());
    assert!(!body.contains("See pre-built binaries documentation"));
    assert!(!body.contains("Update Priorities]"));

    let settings = ReleaseSettings {
        binaries_doc_url: "https://book.example/binaries.html".to_string(),
        ..ReleaseSettings::default()
    };
    let body = render("v1.2.3", &[], &settings);
    assert!(body.contains("[See pre-built binaries documentation.](https://book.example/binaries.html)"));
}
