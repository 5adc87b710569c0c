use folio_site_core::{
    dispatch, MenuAction, MenuButton, MenuControl, MenuState, Navigator, PanelLayout,
    PanelTransition, Section, SiteConfig, SiteError, SocialLink,
};

#[derive(Default)]
struct Recorder {
    jumps: Vec<u8>,
    opened: Vec<(String, String)>,
}

impl Navigator for Recorder {
    fn jump_to_section(&mut self, index: u8) {
        self.jumps.push(index);
    }

    fn open_external(&mut self, url: &str, target: &str) {
        self.opened.push((url.to_string(), target.to_string()));
    }
}

fn site() -> SiteConfig {
    folio_test_fixtures::site::load("default").expect("site fixture")
}

#[test]
fn fixture_matches_defaults() {
    assert_eq!(site(), SiteConfig::default());
}

#[test]
fn section_buttons_jump_in_order() {
    let mut nav = Recorder::default();
    let buttons = MenuButton::all();
    let labels: Vec<_> = buttons.iter().map(|b| b.label()).collect();
    assert_eq!(labels, ["About", "Skills", "Projects", "Contact"]);
    for b in buttons {
        dispatch(&b.action(), &mut nav);
    }
    assert_eq!(nav.jumps, vec![0, 1, 2, 3]);
    assert!(nav.opened.is_empty());
}

#[test]
fn social_links_open_new_tabs_except_mail() {
    let cfg = site();
    let mut nav = Recorder::default();
    for link in SocialLink::ALL {
        dispatch(&link.action(&cfg), &mut nav);
    }
    assert_eq!(nav.jumps, vec![Section::Contact.index()]);
    let urls: Vec<&str> = nav.opened.iter().map(|(u, _)| u.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://github.com/Rohan-Raidani",
            "https://www.linkedin.com/in/rohan-raidani-59b57923b/",
            cfg.resume_url.as_str(),
            cfg.share_url.as_str(),
        ]
    );
    assert!(nav.opened.iter().all(|(_, t)| t == "_blank"));
    assert!(cfg.share_url.starts_with("https://api.whatsapp.com/send?text="));
}

#[test]
fn tooltips() {
    let tips: Vec<_> = SocialLink::ALL.iter().map(|l| l.tooltip()).collect();
    assert_eq!(tips, ["Github", "Linkdin", "Mail", "Resume", "Share"]);
}

#[test]
fn press_by_id() {
    let cfg = SiteConfig::default();
    let menu = MenuState::new(&cfg);
    let mut nav = Recorder::default();
    assert_eq!(
        menu.press("mail", &cfg, &mut nav).unwrap(),
        MenuAction::JumpTo(Section::Contact)
    );
    assert!(matches!(
        menu.press("instagram", &cfg, &mut nav),
        Err(SiteError::UnknownControl(_))
    ));
    assert_eq!(nav.jumps, vec![3]);
    assert_eq!(
        MenuControl::parse("projects").unwrap(),
        MenuControl::Section(Section::Projects)
    );
}

#[test]
fn panel_width_by_viewport() {
    let layout = PanelLayout::default();
    assert_eq!(layout.width(false, 1280.0), 0.0);
    assert_eq!(layout.width(false, 375.0), 0.0);
    assert_eq!(layout.width(true, 375.0), 375.0);
    assert_eq!(layout.width(true, 767.0), 767.0);
    assert_eq!(layout.width(true, 768.0), 320.0);
    assert_eq!(layout.width(true, 1920.0), 320.0);
}

#[test]
fn panel_animates_over_150ms() {
    let cfg = SiteConfig::default();
    let mut menu = MenuState::new(&cfg);
    assert_eq!(menu.tick(16.0, 1280.0), 0.0);

    menu.toggle();
    let mid = menu.tick(75.0, 1280.0);
    assert!(mid > 160.0 && mid < 320.0, "mid-flight width {mid}");
    assert_eq!(menu.tick(75.0, 1280.0), 320.0);

    // close halfway through, then reopen: each retarget starts where the panel is
    menu.toggle();
    let closing = menu.tick(50.0, 1280.0);
    assert!(closing < 320.0 && closing > 0.0);
    menu.toggle();
    let reopening = menu.tick(0.0, 1280.0);
    assert!((reopening - closing).abs() < 1e-3);
    assert_eq!(menu.tick(150.0, 1280.0), 320.0);
}

#[test]
fn transition_settles() {
    let mut t = PanelTransition::new(0.0, 150.0);
    assert!(t.is_settled());
    t.retarget(320.0);
    assert!(!t.is_settled());
    t.tick(200.0);
    assert!(t.is_settled());
    assert_eq!(t.width(), 320.0);
}

#[test]
fn actions_serialize_tagged() {
    let json = serde_json::to_value(MenuAction::open_in_new_tab("https://example.org")).unwrap();
    assert_eq!(json["kind"], "open_external");
    assert_eq!(json["value"]["target"], "_blank");
}
