mod common;

use scene_ngin::{
    SceneError,
    data_structures::texture_slots::{MAX_TEXTURE_SLOTS, TextureSlots},
    resources::texture::TextureHandle,
};

use crate::common::test_utils::{FakeLoader, init};

#[test]
fn slots_are_assigned_in_registration_order() {
    init();
    let mut loader = FakeLoader::new();
    let mut slots = TextureSlots::new();

    assert_eq!(slots.register("wood", "wood.png", &mut loader).unwrap(), 0);
    assert_eq!(slots.register("stone", "stone.jpg", &mut loader).unwrap(), 1);
    assert_eq!(slots.register("grass", "grass.png", &mut loader).unwrap(), 2);

    assert_eq!(slots.find_slot("stone"), Some(1));
    assert_eq!(slots.find_slot("grass"), Some(2));
    assert_eq!(slots.find_slot("marble"), None);
    assert_eq!(slots.len(), 3);
}

#[test]
fn seventeenth_texture_exceeds_capacity_without_loading() {
    init();
    let mut loader = FakeLoader::new();
    let log = loader.shared_log();
    let mut slots = TextureSlots::new();

    for i in 0..MAX_TEXTURE_SLOTS {
        let tag = format!("tex{i}");
        assert_eq!(slots.register(&tag, "tex.png", &mut loader).unwrap(), i);
    }
    assert!(slots.is_full());

    let err = slots
        .register("one_too_many", "tex.png", &mut loader)
        .unwrap_err();
    assert!(matches!(
        err,
        SceneError::CapacityExceeded { ref tag, capacity: 16 } if tag == "one_too_many"
    ));
    assert_eq!(log.borrow().loaded.len(), MAX_TEXTURE_SLOTS);
    assert_eq!(slots.len(), MAX_TEXTURE_SLOTS);
    assert_eq!(slots.find_slot("tex0"), Some(0));
    assert_eq!(slots.find_slot("tex15"), Some(15));
}

#[test]
fn duplicate_tag_is_rejected_and_keeps_the_first_texture() {
    init();
    let mut loader = FakeLoader::new();
    let log = loader.shared_log();
    let mut slots = TextureSlots::new();

    slots.register("wood", "oak.png", &mut loader).unwrap();
    let err = slots.register("wood", "pine.png", &mut loader).unwrap_err();

    assert!(matches!(err, SceneError::DuplicateTag { ref tag } if tag == "wood"));
    assert_eq!(err.tag(), Some("wood"));
    assert_eq!(slots.len(), 1);
    assert_eq!(slots.handle(0), Some(TextureHandle(0)));
    assert_eq!(log.borrow().loaded, vec![("wood".to_string(), "oak.png".to_string())]);
}

#[test]
fn empty_tag_is_rejected() {
    let mut loader = FakeLoader::new();
    let mut slots = TextureSlots::new();

    let err = slots.register("", "tex.png", &mut loader).unwrap_err();
    assert!(matches!(err, SceneError::EmptyTag));
    assert!(slots.is_empty());
    assert!(loader.log.borrow().loaded.is_empty());
}

#[test]
fn failed_load_does_not_consume_a_slot() {
    init();
    let mut loader = FakeLoader::failing_on("broken.png");
    let mut slots = TextureSlots::new();

    slots.register("a", "a.png", &mut loader).unwrap();
    let err = slots.register("b", "broken.png", &mut loader).unwrap_err();
    assert!(matches!(err, SceneError::TextureLoad { ref tag, .. } if tag == "b"));
    assert!(std::error::Error::source(&err).is_some());

    assert_eq!(slots.register("c", "c.png", &mut loader).unwrap(), 1);
    assert_eq!(slots.find_slot("b"), None);
    assert_eq!(slots.find_slot("c"), Some(1));
}

#[test]
fn slot_of_reports_unknown_tags() {
    let slots = TextureSlots::new();
    let err = slots.slot_of("missing").unwrap_err();
    assert!(matches!(err, SceneError::TextureNotFound { ref tag } if tag == "missing"));
}

#[test]
fn bind_all_binds_each_texture_to_its_slot() {
    let mut loader = FakeLoader::new();
    let log = loader.shared_log();
    let mut slots = TextureSlots::new();

    slots.register("a", "a.png", &mut loader).unwrap();
    slots.register("b", "b.png", &mut loader).unwrap();
    slots.bind_all(&mut loader);

    assert_eq!(
        log.borrow().bound,
        vec![(0, TextureHandle(0)), (1, TextureHandle(1))]
    );
}

#[test]
fn release_all_releases_every_handle_and_empties_the_registry() {
    let mut loader = FakeLoader::new();
    let log = loader.shared_log();
    let mut slots = TextureSlots::new();

    slots.register("a", "a.png", &mut loader).unwrap();
    slots.register("b", "b.png", &mut loader).unwrap();
    slots.release_all(&mut loader);

    assert!(slots.is_empty());
    assert_eq!(
        log.borrow().released,
        vec![TextureHandle(0), TextureHandle(1)]
    );

    // Released slots are free again.
    assert_eq!(slots.register("a", "a.png", &mut loader).unwrap(), 0);
}
