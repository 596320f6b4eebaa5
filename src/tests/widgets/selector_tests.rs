use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::executor::block_on;
use serde_json::Value;

use crate::creation::{AddOptionLink, AllowAll, DenyAll};
use crate::reference::{RefOption, ReferenceCache, ReferenceKind};
use crate::signal::WidgetEvent;
use crate::tests::support::{GatedFetcher, ScriptedFlow, crops, options, updates, valid_events};
use crate::widgets::{
    FormWidget, SelectorBehaviour, SelectorProps, SingleSelector, WidgetPalette,
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn crop_link() -> AddOptionLink {
    AddOptionLink::new("/crops/new", ReferenceKind::Crops)
}

#[test]
fn construction_announces_ready_then_validity() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_required(true));
    assert_eq!(
        selector.drain_events(),
        vec![WidgetEvent::Ready, WidgetEvent::Valid(false)]
    );
    assert!(!selector.is_valid());
}

#[test]
fn selecting_reports_the_value_and_the_validity_edge() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_required(true));
    selector.drain_events();

    assert!(selector.select("KALE"));
    assert!(selector.select("BEAN"));
    let events = selector.drain_events();

    assert_eq!(
        updates(&events),
        vec![Some("KALE".to_string()), Some("BEAN".to_string())]
    );
    assert_eq!(valid_events(&events), vec![true]);
    assert_eq!(selector.display_value(), "Bean");
    assert_eq!(selector.current_value(), Value::String("BEAN".into()));
}

#[test]
fn unknown_ids_are_ignored() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()));
    selector.drain_events();
    assert!(!selector.select("PEA"));
    assert!(selector.drain_events().is_empty());
    assert_eq!(selector.selected(), None);
}

#[test]
fn clearing_always_emits_none() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()));
    selector.drain_events();

    selector.clear();
    assert_eq!(updates(&selector.drain_events()), vec![None]);
    assert_eq!(selector.display_value(), "<none>");
    assert_eq!(selector.current_value(), Value::Null);
}

#[test]
fn upstream_changes_do_not_echo_updates() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_required(true));
    selector.drain_events();

    selector.set_selected(Some("CARROT".into()));
    let events = selector.drain_events();
    assert!(updates(&events).is_empty());
    assert_eq!(valid_events(&events), vec![true]);

    selector.set_selected(Some(String::new()));
    assert_eq!(selector.selected(), None);
}

#[test]
fn replacing_options_drops_a_vanished_selection() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_selected("KALE"));
    selector.drain_events();

    selector.set_options(options(&[("BEAN", "Bean"), ("KALE", "Curly kale")]));
    assert!(selector.drain_events().is_empty());
    assert_eq!(selector.display_value(), "Curly kale");

    selector.set_options(options(&[("BEAN", "Bean")]));
    assert_eq!(updates(&selector.drain_events()), vec![None]);
}

#[test]
fn loads_options_through_the_cache() {
    let fetcher = GatedFetcher::new(vec![RefOption::new("PEA", "Pea")]);
    let cache = ReferenceCache::shared(fetcher.clone());
    let mut selector = SingleSelector::new(SelectorProps::default().with_selected("PEA"));

    assert!(block_on(selector.load_options(&cache, &ReferenceKind::Crops)));
    assert_eq!(selector.options().len(), 1);
    assert_eq!(selector.selected(), Some("PEA"));
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn failed_loads_clear_options_and_report_the_resource_message() {
    let fetcher = GatedFetcher::new(Vec::new());
    fetcher.set_failing(true);
    let cache = ReferenceCache::shared(fetcher);
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_selected("BEAN"));
    selector.drain_events();

    assert!(!block_on(selector.load_options(&cache, &ReferenceKind::Crops)));
    assert_eq!(
        selector.drain_events(),
        vec![WidgetEvent::Error("Unable to fetch crops.".into())]
    );
    assert!(selector.options().is_empty());
    assert_eq!(selector.selected(), Some("BEAN"));
    assert_eq!(selector.display_value(), "BEAN");
}

#[test]
fn created_options_are_selected_without_fetching() {
    let fetcher = GatedFetcher::new(Vec::new());
    let _cache = ReferenceCache::shared(fetcher.clone());
    let mut selector =
        SingleSelector::new(SelectorProps::new(crops()).with_add_option(crop_link()));
    selector.drain_events();
    let created = RefOption::new("PEA", "Pea");
    let mut flow = ScriptedFlow::creating(created.clone());

    let added = block_on(selector.add_option(&mut flow, &AllowAll));

    assert_eq!(added, Some(created.clone()));
    assert_eq!(selector.selected(), Some("PEA"));
    assert_eq!(selector.options().len(), 4);
    assert_eq!(fetcher.calls(), 0);
    assert_eq!(flow.launched, vec![crop_link()]);
    let events = selector.drain_events();
    assert_eq!(events[0], WidgetEvent::OptionAdded(created));
    assert_eq!(updates(&events), vec![Some("PEA".to_string())]);
}

#[test]
fn cancelled_or_unauthorized_creation_changes_nothing() {
    let mut selector = SingleSelector::new(
        SelectorProps::new(crops())
            .with_selected("BEAN")
            .with_add_option(crop_link()),
    );
    selector.drain_events();

    let mut flow = ScriptedFlow::cancelling();
    assert_eq!(block_on(selector.add_option(&mut flow, &AllowAll)), None);
    assert_eq!(flow.launched.len(), 1);

    let mut flow = ScriptedFlow::creating(RefOption::plain("PEA"));
    assert!(!selector.can_add_option(&DenyAll));
    assert_eq!(block_on(selector.add_option(&mut flow, &DenyAll)), None);
    assert!(flow.launched.is_empty());

    let only_equipment = |kind: &ReferenceKind| *kind == ReferenceKind::Equipment;
    assert!(!selector.can_add_option(&only_equipment));

    assert_eq!(selector.selected(), Some("BEAN"));
    assert!(selector.drain_events().is_empty());
}

#[test]
fn selectors_without_a_link_never_offer_creation() {
    let selector = SingleSelector::new(SelectorProps::new(crops()));
    assert!(!selector.can_add_option(&AllowAll));
}

#[test]
fn arrow_keys_step_through_options_and_wrap() {
    let mut selector = SingleSelector::new(SelectorProps::new(crops()));

    assert!(selector.handle_key(&key(KeyCode::Down)));
    assert_eq!(selector.selected(), Some("BEAN"));
    assert!(selector.handle_key(&key(KeyCode::Up)));
    assert_eq!(selector.selected(), Some("KALE"));
    assert!(selector.handle_key(&key(KeyCode::Delete)));
    assert_eq!(selector.selected(), None);
    assert!(!selector.handle_key(&key(KeyCode::Backspace)));
}

#[test]
fn wrapping_can_be_disabled_through_the_palette() {
    let palette = WidgetPalette::default()
        .with_selector_behaviour(SelectorBehaviour::default().with_wrap(false));
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_selected("KALE"))
        .with_palette(Arc::new(palette));

    assert!(!selector.handle_key(&key(KeyCode::Down)));
    assert_eq!(selector.selected(), Some("KALE"));
    assert!(selector.handle_key(&key(KeyCode::Up)));
    assert_eq!(selector.selected(), Some("CARROT"));
}
