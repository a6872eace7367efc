use crate::domain::{Container, Image};

/// Containers whose image repo and tag equal `image`'s, in snapshot order
pub fn find_dependents<'a>(image: &Image, containers: &'a [Container]) -> Vec<&'a Container> {
    containers.iter().filter(|c| c.uses(image)).collect()
}
