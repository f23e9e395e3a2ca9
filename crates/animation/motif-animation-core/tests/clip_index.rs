use motif_animation_core::{motion_set, ClipIndex, ClipRef, ClipResource, MotionSet, PlaybackError};
use motif_test_fixtures::clip_sets;
use serde::Deserialize;

motion_set! {
    enum Hero { Idle, Walk, Run, Jump, Attack, Damage, Dead }
}

#[derive(Debug, Deserialize)]
struct ClipSet {
    identifiers: Vec<String>,
    clips: Vec<ClipResource>,
}

fn load_set(name: &str) -> (Vec<String>, Vec<ClipRef>) {
    let set: ClipSet = clip_sets::load(name).expect("clip set fixture");
    let clips = set.clips.into_iter().map(ClipRef::new).collect();
    (set.identifiers, clips)
}

fn shared(names: &[&str]) -> Vec<ClipRef> {
    names
        .iter()
        .map(|n| ClipResource::shared(*n, 1.0, false))
        .collect()
}

#[test]
fn every_input_name_round_trips() {
    for key in clip_sets::keys() {
        let (identifiers, clips) = load_set(&key);
        let index = ClipIndex::build(&clips, identifiers);
        for clip in &clips {
            let found = index.get_clip_by_name(&clip.name).expect("clip by name");
            assert_eq!(found.name, clip.name, "fixture {key}");
            assert!(index.exists(&clip.name));
        }
    }
}

#[test]
fn humanoid_identities_resolve_by_suffix() {
    let (_, clips) = load_set("humanoid");
    let index = ClipIndex::from_motions::<Hero>(&clips);

    assert_eq!(index.len(), Hero::count());
    assert_eq!(index.motion_clip(Hero::Idle).unwrap().unwrap().name, "Hero_Idle");
    assert_eq!(index.motion_clip(Hero::Run).unwrap().unwrap().name, "Hero_Run");
    assert_eq!(index.motion_clip(Hero::Dead).unwrap().unwrap().name, "Hero_Dead");
    assert!(index.motion_clip(Hero::Damage).unwrap().is_none());

    // Unmatched clips are only reachable by name.
    assert!(index.exists("Hero_Emote"));
    assert_eq!(index.clip_count(), 7);
}

#[test]
fn last_matching_clip_wins_its_identity() {
    let index = ClipIndex::build(&shared(&["A_Idle", "B_Idle"]), ["Idle"]);
    assert_eq!(index.get_clip(0).unwrap().unwrap().name, "B_Idle");
    assert_eq!(index.clip_name(0).unwrap(), Some("B_Idle"));
}

#[test]
fn duplicate_names_overwrite_in_both_tables() {
    let (identifiers, clips) = load_set("duplicates");
    let index = ClipIndex::build(&clips, identifiers);

    assert_eq!(index.get_clip(0).unwrap().unwrap().name, "New_Idle");
    let walk = index.get_clip(1).unwrap().unwrap();
    assert_eq!(walk.duration, 2.0);
    assert!(!walk.is_looping);
    assert_eq!(index.get_clip_by_name("Hero_Walk").unwrap().duration, 2.0);
    // The replaced idle clip keeps its name entry.
    assert!(index.exists("Old_Idle"));
    assert_eq!(index.clip_count(), 3);
}

#[test]
fn cached_names_align_with_identity_table() {
    for key in clip_sets::keys() {
        let (identifiers, clips) = load_set(&key);
        let index = ClipIndex::build(&clips, identifiers);
        for i in 0..index.len() {
            let clip = index.get_clip(i).unwrap();
            let name = index.clip_name(i).unwrap();
            assert_eq!(clip.is_some(), name.is_some(), "fixture {key} slot {i}");
            if let (Some(clip), Some(name)) = (clip, name) {
                assert_eq!(clip.name, name);
            }
        }
    }
}

#[test]
fn identity_index_out_of_range_is_not_recoverable() {
    let index = ClipIndex::build(&shared(&["A_Idle"]), ["Idle", "Walk"]);
    let err = index.get_clip(2).unwrap_err();
    assert_eq!(err, PlaybackError::IdentityOutOfRange { index: 2, len: 2 });
    assert!(!err.is_recoverable());
}

#[test]
fn missing_name_is_a_recoverable_lookup_miss() {
    let index = ClipIndex::build(&shared(&["A_Idle"]), ["Idle"]);
    let err = index.get_clip_by_name("A_Walk").unwrap_err();
    assert_eq!(
        err,
        PlaybackError::ClipNotFound {
            name: "A_Walk".to_string()
        }
    );
    assert!(err.is_recoverable());
    assert!(!index.exists("A_Walk"));
}

#[test]
fn add_clip_leaves_identity_lookups_stale() {
    let mut index = ClipIndex::build(&shared(&["A_Idle"]), ["Idle", "Walk"]);
    index.add_clip(ClipResource::shared("A_Walk", 1.0, true));
    index.add_clip(ClipResource::shared("B_Idle", 1.0, true));

    assert!(index.exists("A_Walk"));
    assert!(index.get_clip_by_name("A_Walk").unwrap().is_looping);
    // Identity table was fixed at build time.
    assert!(index.get_clip(1).unwrap().is_none());
    assert_eq!(index.clip_name(1).unwrap(), None);
    assert_eq!(index.get_clip(0).unwrap().unwrap().name, "A_Idle");
}

#[test]
fn add_clip_overwrites_by_name() {
    let mut index = ClipIndex::build(&shared(&["A_Idle"]), ["Idle"]);
    index.add_clip(ClipResource::shared("A_Idle", 5.0, true));
    assert_eq!(index.get_clip_by_name("A_Idle").unwrap().duration, 5.0);
    // Identity slot still holds the build-time clip.
    assert_eq!(index.get_clip(0).unwrap().unwrap().duration, 1.0);
}

#[test]
fn identifiers_keep_declaration_order() {
    let index = ClipIndex::from_motions::<Hero>(&[]);
    let names: Vec<&str> = index.identifiers().iter().map(String::as_str).collect();
    assert_eq!(names, Hero::NAMES);
    assert!((0..index.len()).all(|i| index.get_clip(i).unwrap().is_none()));
}
