use folio_site_core::{ResumeViewer, SiteConfig};

#[test]
fn default_embed() {
    let viewer = ResumeViewer::new(&SiteConfig::default());
    assert_eq!(viewer.frame.src, "/resume/Rohan-Raidani.pdf");
    assert_eq!(viewer.frame.width, "100%");
    assert_eq!(viewer.frame.height, "100%");
    assert_eq!(viewer.frame.border, "none");
    assert_eq!(viewer.container.height, "100vh");
    assert_eq!(viewer.container.padding, "20px");
    assert!(viewer.container.centered);

    let html = viewer.to_html();
    assert!(html.contains(r#"src="/resume/Rohan-Raidani.pdf""#));
    assert!(html.contains("justify-content: center"));
}

#[test]
fn partial_config_escapes_document_path() {
    let json = folio_test_fixtures::site::json("partial").unwrap();
    let cfg = SiteConfig::from_json(&json).unwrap();
    assert_eq!(cfg.github_url, SiteConfig::default().github_url);

    let html = ResumeViewer::new(&cfg).to_html();
    assert!(html.contains(r#"src="/resume/cv &amp; notes.pdf""#));
}

#[test]
fn viewer_is_stateless() {
    let cfg = SiteConfig::default();
    assert_eq!(ResumeViewer::new(&cfg), ResumeViewer::new(&cfg));
    assert_eq!(ResumeViewer::new(&cfg).to_html(), ResumeViewer::new(&cfg).to_html());
}
