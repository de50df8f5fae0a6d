/// Asserts that the organism with the given name has exactly the given size.
#[macro_export]
macro_rules! assert_size {
    ($world:expr, $name:expr, $size:expr) => {
        let organism = $world
            .organisms
            .iter()
            .find(|o| o.name == $name)
            .expect("Organism not found in world");
        assert_eq!(
            organism.size, $size,
            "Organism {} has size {}, expected {}",
            $name, organism.size, $size
        );
    };
}

/// Asserts that no organism with the given id remains in the world.
#[macro_export]
macro_rules! assert_organism_gone {
    ($world:expr, $id:expr) => {
        let exists = $world.organisms.iter().any(|o| o.id == $id);
        assert!(!exists, "Organism {} should be gone but was found", $id);
        let listed = $world.clusters.iter().any(|c| c.members.contains(&$id));
        assert!(!listed, "Organism {} is still listed in a cluster", $id);
    };
}
