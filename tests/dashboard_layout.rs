use command_hub::dashboard::{
    DashboardError, DashboardSession, Footprint, GridPos, Mode, Widget, WidgetKind,
    WidgetRegistry,
};
use command_hub::dashboard::widgets::WidgetContext;
use std::collections::HashSet;

struct Label(&'static str);

impl Widget for Label {
    fn render(&self, _ctx: &WidgetContext<'_>) -> Vec<String> {
        vec![self.0.to_string()]
    }
}

fn customizing(columns: usize) -> DashboardSession {
    let mut session = DashboardSession::new(WidgetRegistry::with_defaults(), columns);
    session.toggle_customize();
    session
}

fn assert_invariants(session: &DashboardSession) {
    let layout = session.layout();
    let mut kinds = HashSet::new();
    let mut ids = HashSet::new();
    for inst in layout.instances() {
        assert!(kinds.insert(inst.kind.clone()), "kind {} placed twice", inst.kind);
        assert!(ids.insert(inst.id.clone()), "id {} used twice", inst.id);
        assert!(inst.position.x + inst.footprint.width <= layout.columns());
    }
    let all = layout.instances();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert!(!a.overlaps(b), "{} overlaps {}", a.kind, b.kind);
        }
    }
    assert!(session.validate().is_ok());
}

#[test]
fn packs_in_reading_order() {
    let mut s = customizing(3);
    s.add_widget("system-monitor").unwrap();
    s.add_widget("weather").unwrap();
    s.add_widget("quick-actions").unwrap();
    assert_eq!(
        s.instance_for_kind("system-monitor").unwrap().position,
        GridPos::new(0, 0)
    );
    assert_eq!(s.instance_for_kind("weather").unwrap().position, GridPos::new(2, 0));
    assert_eq!(
        s.instance_for_kind("quick-actions").unwrap().position,
        GridPos::new(2, 1)
    );
    assert_invariants(&s);
}

#[test]
fn footprint_wider_than_grid_is_rejected() {
    let mut registry = WidgetRegistry::with_defaults();
    registry
        .register(WidgetKind::new("x", "Banner", Footprint::new(4, 1), Label("x")))
        .unwrap();
    let mut s = DashboardSession::new(registry, 3);
    s.toggle_customize();
    let err = s.add_widget("x").unwrap_err();
    assert!(matches!(err, DashboardError::Placement(_)));
    assert!(s.is_empty());
}

#[test]
fn unknown_kind_is_not_found() {
    let mut s = customizing(3);
    assert!(matches!(
        s.add_widget("stock-ticker"),
        Err(DashboardError::NotFound { .. })
    ));
}

#[test]
fn toggling_twice_returns_to_viewing() {
    let mut s = DashboardSession::new(WidgetRegistry::with_defaults(), 3);
    assert_eq!(s.mode(), Mode::Viewing);
    assert_eq!(s.toggle_customize(), Mode::Customizing);
    assert_eq!(s.toggle_customize(), Mode::Viewing);
    assert!(matches!(
        s.add_widget("weather"),
        Err(DashboardError::InvalidMode)
    ));
}

#[test]
fn invariants_hold_across_edit_sequences() {
    let kinds = [
        "system-monitor",
        "weather",
        "quick-actions",
        "recent-activity",
        "performance-overview",
    ];
    for columns in 1..=4 {
        let mut s = customizing(columns);
        // Deterministic walk mixing adds, repeated adds and removals.
        for step in 0..60usize {
            let kind = kinds[(step * 7 + columns) % kinds.len()];
            if step % 3 == 2 {
                if let Some(id) = s.instance_for_kind(kind).map(|i| i.id.clone()) {
                    s.remove_widget(&id).unwrap();
                }
            } else {
                let placed = s.instance_for_kind(kind).is_some();
                match s.add_widget(kind) {
                    Ok(_) => assert!(!placed),
                    Err(DashboardError::DuplicateKind(_)) => assert!(placed),
                    Err(DashboardError::Placement(_)) => assert!(columns < 2),
                    Err(e) => panic!("unexpected error: {e}"),
                }
            }
            assert_invariants(&s);
        }
    }
}

#[test]
fn removal_does_not_compact() {
    let mut s = customizing(3);
    s.add_widget("weather").unwrap();
    s.add_widget("quick-actions").unwrap();
    s.add_widget("system-monitor").unwrap();
    let monitor = s.instance_for_kind("system-monitor").unwrap().position;
    assert_eq!(monitor, GridPos::new(0, 1));
    let weather = s.instance_for_kind("weather").unwrap().id.clone();
    s.remove_widget(&weather).unwrap();
    assert_eq!(
        s.instance_for_kind("system-monitor").unwrap().position,
        monitor
    );
    assert_eq!(
        s.instance_for_kind("quick-actions").unwrap().position,
        GridPos::new(1, 0)
    );
}

#[test]
fn render_passes_renderer_output_through() {
    let mut registry = WidgetRegistry::default();
    registry
        .register(WidgetKind::new("note", "Note", Footprint::new(1, 1), Label("hello")))
        .unwrap();
    let mut s = DashboardSession::new(registry, 2);
    s.toggle_customize();
    s.add_widget("note").unwrap();
    let rendered = s.render();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].1, vec!["hello".to_string()]);
}
