mod common;

use common::{id_of, player_id, roll, ScriptedRng, WorldBuilder};
use evolve_core::cluster::power;
use evolve_core::turn::{advance_turn, TurnEvent};
use evolve_data::{OrganismKind, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

#[test]
fn test_no_player_turn() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(
        advance_turn(&mut world, &mut rng).unwrap(),
        vec![TurnEvent::NoPlayer]
    );
}

#[test]
fn test_spawn_band_adds_wild_cell() {
    let mut world = WorldBuilder::new()
        .with_player(OrganismKind::Omnivore, "Ada", 3)
        .build();
    let mut rng = ScriptedRng::new(&[roll(0.05)]);

    let events = advance_turn(&mut world, &mut rng).unwrap();

    assert_eq!(world.organisms.len(), 2);
    let spawned = &world.organisms[1];
    assert!((1..8).contains(&spawned.size));
    assert!(matches!(
        spawned.kind,
        OrganismKind::Herbivore | OrganismKind::Carnivore
    ));
    assert_ne!(spawned.name, "Ada");
    assert_eq!(
        events,
        vec![TurnEvent::Spawned {
            name: spawned.name.clone(),
            kind: spawned.kind,
            size: spawned.size,
        }]
    );
}

#[test]
fn test_migration_picks_strongest_cluster() {
    let mut world = WorldBuilder::new()
        .with_player(OrganismKind::Omnivore, "Ada", 3)
        .with_cluster("Low3", &["Ada"])
        .with_cluster("Mid40", &[])
        .with_cluster("High80", &[])
        .with_cluster("Also80", &[])
        .build();
    let ada = player_id(&world);
    let mut rng = ScriptedRng::new(&[roll(0.90)]);

    let events = advance_turn(&mut world, &mut rng).unwrap();

    assert_eq!(
        events,
        vec![TurnEvent::JoinedCluster {
            name: "Ada".into(),
            cluster: "High80".into(),
            power: 80,
            left: Some("Low3".into()),
        }]
    );
    assert!(!world.clusters[0].contains(&ada));
    assert!(world.clusters[2].contains(&ada));
    assert_eq!(world.clusters.len(), 4);
}

#[test]
fn test_migration_forms_cluster_when_none_is_stronger() {
    let mut world = WorldBuilder::new()
        .with_player(OrganismKind::Omnivore, "Ada", 3)
        .with_cluster("Weak5", &[])
        .with_cluster("Top99", &["Ada"])
        .build();
    let ada = player_id(&world);
    let mut rng = ScriptedRng::new(&[roll(0.86)]);

    let events = advance_turn(&mut world, &mut rng).unwrap();

    assert_eq!(world.clusters.len(), 3);
    let formed = &world.clusters[2];
    assert!(formed.contains(&ada));
    assert!(!world.clusters[1].contains(&ada));
    let wild = formed.members.len() - 1;
    assert!((2..=5).contains(&wild));
    assert_eq!(world.organisms.len(), 1 + wild);
    assert!((1..100).contains(&power(&formed.name)));

    match &events[..] {
        [TurnEvent::ClusterFormed { cluster, members }, TurnEvent::JoinedCluster {
            cluster: joined,
            left,
            ..
        }] => {
            assert_eq!(cluster, joined);
            assert_eq!(*members, wild);
            assert_eq!(left.as_deref(), Some("Top99"));
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn test_predation_without_target_falls_through_to_migration() {
    let mut world = WorldBuilder::new()
        .with_player(OrganismKind::Carnivore, "Fang", 1)
        .with_organism("Brute", OrganismKind::Carnivore, 7)
        .with_cluster("Den20", &["Brute"])
        .build();
    let fang = player_id(&world);
    let mut rng = ScriptedRng::new(&[roll(0.50)]);

    let events = advance_turn(&mut world, &mut rng).unwrap();

    assert_eq!(
        events,
        vec![TurnEvent::JoinedCluster {
            name: "Fang".into(),
            cluster: "Den20".into(),
            power: 20,
            left: None,
        }]
    );
    assert!(world.clusters[0].contains(&fang));
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn test_predation_picks_first_of_equal_targets() {
    let mut world = WorldBuilder::new()
        .with_player(OrganismKind::Omnivore, "Ada", 10)
        .with_organism("Small", OrganismKind::Herbivore, 2)
        .with_organism("First", OrganismKind::Herbivore, 6)
        .with_organism("Second", OrganismKind::Carnivore, 6)
        .with_organism("Big", OrganismKind::Carnivore, 10)
        .build();
    let second = id_of(&world, "Second");
    let mut rng = ScriptedRng::new(&[roll(0.40)]);

    advance_turn(&mut world, &mut rng).unwrap();

    assert!(world.organisms.iter().all(|o| o.name != "First"));
    assert!(world.organism(&second).is_some());
    assert_eq!(world.player().unwrap().size, 16);
}

#[test]
fn test_same_seed_same_story() {
    let run = |seed: u64| {
        let mut world = WorldBuilder::new()
            .with_player(OrganismKind::Omnivore, "Ada", 3)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut story = Vec::new();
        for _ in 0..200 {
            story.extend(advance_turn(&mut world, &mut rng).unwrap());
        }
        let summary: Vec<(String, u32)> = world
            .organisms
            .iter()
            .map(|o| (o.name.clone(), o.size))
            .collect();
        (story, summary)
    };
    assert_eq!(run(12345), run(12345));
}

#[test]
fn test_long_run_invariants() {
    for seed in 0..10 {
        let mut world = WorldBuilder::new()
            .with_player(OrganismKind::Carnivore, "Fang", 3)
            .build();
        let fang = player_id(&world);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut last_size = 3;

        for _ in 0..300 {
            let events = advance_turn(&mut world, &mut rng).unwrap();
            assert!(!events.is_empty());

            let player = world.player().expect("player survives");
            assert!(player.size >= last_size, "player shrank");
            last_size = player.size;
            assert!(world.organisms.iter().all(|o| o.size >= 1));

            let mut seen = HashSet::new();
            for cluster in &world.clusters {
                let unique: HashSet<_> = cluster.members.iter().collect();
                assert_eq!(unique.len(), cluster.members.len(), "duplicate member");
                for member in &cluster.members {
                    assert!(world.organism(member).is_some(), "dangling member");
                    assert!(seen.insert(*member), "cell in two clusters");
                }
            }
        }
        assert_eq!(world.player, Some(fang));
    }
}
