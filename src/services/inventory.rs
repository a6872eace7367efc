use crate::domain::{Container, ContainerEngine, ContainerScope, DEFAULT_TAG, Image, Reference};
use crate::services::resolver::resolve;
use tracing::{debug, error};

/// Images and containers as listed by the engine when the run started.
///
/// Built once and never refreshed, so a container removed halfway through a
/// batch is still listed here.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    images: Vec<Image>,
    containers: Vec<Container>,
    running: Vec<Container>,
}

impl Inventory {
    /// Queries the engine for images, all containers and running containers.
    ///
    /// A failing query is logged; whatever records it printed before failing
    /// are still parsed.
    pub fn load(engine: &dyn ContainerEngine) -> Self {
        let images = match engine.list_images() {
            Ok(output) => parse_images(&output),
            Err(e) => {
                error!(
                    cmd = e.command(),
                    output = e.output(),
                    error = %e,
                    "falha ao listar imagens"
                );
                parse_images(e.stdout())
            }
        };

        let containers = load_containers(engine, ContainerScope::All, &images);
        let running = load_containers(engine, ContainerScope::Running, &images);

        debug!(
            images = images.len(),
            containers = containers.len(),
            running = running.len(),
            "inventário carregado"
        );

        Self {
            images,
            containers,
            running,
        }
    }

    pub fn from_parts(
        images: Vec<Image>,
        containers: Vec<Container>,
        running: Vec<Container>,
    ) -> Self {
        Self {
            images,
            containers,
            running,
        }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn containers(&self, scope: ContainerScope) -> &[Container] {
        match scope {
            ContainerScope::All => &self.containers,
            ContainerScope::Running => &self.running,
        }
    }
}

fn load_containers(
    engine: &dyn ContainerEngine,
    scope: ContainerScope,
    images: &[Image],
) -> Vec<Container> {
    match engine.list_containers(scope) {
        Ok(output) => parse_containers(&output, images),
        Err(e) => {
            error!(
                cmd = e.command(),
                output = e.output(),
                error = %e,
                %scope,
                "falha ao listar containers"
            );
            parse_containers(e.stdout(), images)
        }
    }
}

/// Parses `ID:REPO:TAG` lines; lines with any other field count are skipped
pub fn parse_images(output: &str) -> Vec<Image> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(':').collect();
            let [id, repo, tag] = parts.as_slice() else {
                debug!(line, "linha de imagem ignorada");
                return None;
            };
            let image = Image::new(*id, *repo, *tag);
            debug!(id = %image.id, repo = %image.repo, tag = %image.tag, "imagem");
            Some(image)
        })
        .collect()
}

/// Parses `ID|IMAGE` or `ID IMAGE` lines, attributing each to a known image
pub fn parse_containers(output: &str, images: &[Image]) -> Vec<Container> {
    output
        .lines()
        .filter_map(|line| parse_container_line(line, images))
        .collect()
}

fn parse_container_line(line: &str, images: &[Image]) -> Option<Container> {
    let delimiter = if line.contains('|') { '|' } else { ' ' };
    let parts: Vec<&str> = line.split(delimiter).collect();
    let [id, image_field] = parts.as_slice() else {
        debug!(line, "linha de container ignorada");
        return None;
    };

    let container = match attribute_image(image_field, images) {
        Some((repo, tag)) => Container::new(*id, repo, tag),
        None => Container::unattributed(*id),
    };

    debug!(
        id = %container.id,
        image_repo = %container.image_repo,
        image_tag = %container.image_tag,
        "container"
    );
    Some(container)
}

/// Maps an engine IMAGE column to (repo, tag).
///
/// `repo:tag` is taken as-is. A value without a colon is either an image ID
/// or a repo whose `latest` tag was elided; the ID reading is tried first.
fn attribute_image(field: &str, images: &[Image]) -> Option<(String, String)> {
    let parts: Vec<&str> = field.split(':').collect();
    match parts.as_slice() {
        [repo, tag] => Some((repo.to_string(), tag.to_string())),
        [bare] if !bare.is_empty() => resolve(&Reference::id_prefix(*bare), images)
            .or_else(|_| resolve(&Reference::repo_tag(*bare, DEFAULT_TAG), images))
            .ok()
            .map(|img| (img.repo.clone(), img.tag.clone())),
        _ => None,
    }
}
