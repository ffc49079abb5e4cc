//! Integration tests for the interaction session

use taxon_tree::core::dataset::default_dataset;
use taxon_tree::core::geometry::Point;
use taxon_tree::core::models::TaxonNode;
use taxon_tree::core::render::ManualClock;
use taxon_tree::core::session::{EngineSettings, Effect, Event, Session};

fn session() -> Session<ManualClock> {
    Session::new(
        &default_dataset(),
        EngineSettings::default(),
        ManualClock::default(),
    )
}

fn settle(s: &mut Session<ManualClock>, ms: u64) {
    s.clock().advance(ms);
    s.handle(Event::Frame);
}

#[test]
fn clicking_a_language_opens_reference_without_toggling() {
    let mut s = session();
    let english = s.tree().find_by_name("English").unwrap();
    let visible = s.tree().visible_ids();

    let effects = s.handle(Event::Click(english));

    assert_eq!(s.tree().visible_ids(), visible);
    assert_eq!(
        effects,
        vec![Effect::OpenReference {
            name: "English".to_string(),
            identifier: "English".to_string(),
            url: "https://en.wikipedia.org/wiki/English_language".to_string(),
        }]
    );
}

#[test]
fn toggling_twice_restores_visible_set() {
    let mut s = session();
    let family = s.tree().find_by_name("Indo-European").unwrap();
    let visible = s.tree().visible_ids();

    s.handle(Event::Click(family));
    assert!(s.tree().visible_ids().len() < visible.len());
    settle(&mut s, 100);
    s.handle(Event::Click(family));
    assert_eq!(s.tree().visible_ids(), visible);
}

#[test]
fn focus_reveals_and_centres_a_hidden_taxon() {
    let mut s = session();
    settle(&mut s, 500);
    let gothic = s.tree().find_by_name("Gothic").unwrap();
    assert!(!s.tree().is_visible(gothic));

    s.handle(Event::Focus("Gothic".to_string()));
    for ancestor in s.tree().ancestors(gothic) {
        assert!(s.tree().node(ancestor).unwrap().is_expanded());
    }
    settle(&mut s, 750);

    let centre = s.camera().viewport().center();
    let on_screen = s.screen_position(gothic).unwrap();
    assert!(on_screen.distance(centre) < 1e-6, "{on_screen:?} vs {centre:?}");
    assert!((s.transform().k - 1.5).abs() < f64::EPSILON);
    assert!(!s.is_animating());
}

#[test]
fn focus_on_unknown_name_is_a_no_op() {
    let mut s = session();
    let visible = s.tree().visible_ids();
    let before = s.transform();

    assert!(s.handle(Event::Focus("Klingon".to_string())).is_empty());
    assert_eq!(s.tree().visible_ids(), visible);
    assert_eq!(s.transform(), before);
}

#[test]
fn fit_to_content_keeps_every_node_in_view() {
    let mut s = session();
    settle(&mut s, 500);
    s.handle(Event::FitToContent);
    settle(&mut s, 250);

    let viewport = s.camera().viewport();
    for id in s.render().settled_ids() {
        let p = s.screen_position(id).unwrap();
        assert!(p.x >= -1e-6 && p.x <= viewport.width + 1e-6, "{p:?}");
        assert!(p.y >= -1e-6 && p.y <= viewport.height + 1e-6, "{p:?}");
    }
}

#[test]
fn fit_to_content_handles_very_tall_trees() {
    let languages = (0..400)
        .map(|i| TaxonNode::language(&format!("Language {i}")))
        .collect();
    let root = TaxonNode::family("Languages", vec![TaxonNode::family("Big", languages)]);
    let mut s = Session::new(&root, EngineSettings::default(), ManualClock::default());
    settle(&mut s, 500);
    s.handle(Event::FitToContent);
    settle(&mut s, 250);

    let viewport = s.camera().viewport();
    assert!(s.transform().k < s.camera().config().min_scale);
    let outside = s
        .render()
        .settled_ids()
        .into_iter()
        .filter_map(|id| s.screen_position(id))
        .filter(|p| p.y < 0.0 || p.y > viewport.height)
        .count();
    assert_eq!(outside, 0);
    assert_eq!(s.render().settled_ids().len(), 402);
}

#[test]
fn expanding_grows_the_canvas() {
    let mut s = session();
    let before = s.canvas().height;
    let effects = s.handle(Event::Focus("English".to_string()));
    let grown = effects.iter().find_map(|e| match e {
        Effect::ResizeCanvas { height } => Some(*height),
        _ => None,
    });
    assert!(grown.unwrap() > before);
    assert!((s.canvas().height - grown.unwrap()).abs() < f64::EPSILON);
}

#[test]
fn hover_panel_follows_pointer() {
    let mut s = session();
    let basque = s.tree().find_by_name("Basque").unwrap();
    let effects = s.handle(Event::PointerEnter {
        node: basque,
        pointer: Point::new(40.0, 60.0),
    });
    match effects.as_slice() {
        [Effect::ShowDetail(panel)] => {
            assert_eq!(panel.anchor, Point::new(52.0, 72.0));
            assert_eq!(panel.note.as_deref(), Some("Language isolate"));
            assert_eq!(
                panel.call_to_action.as_deref(),
                Some("Click to view on Wikipedia →")
            );
        }
        other => panic!("unexpected effects {other:?}"),
    }
}
