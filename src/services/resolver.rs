use crate::domain::{Image, Reference, RmiError};
use tracing::debug;

/// Parses user input and resolves it against the image snapshot
pub fn resolve_input<'a>(input: &str, images: &'a [Image]) -> Result<&'a Image, RmiError> {
    let reference = Reference::parse(input)?;
    resolve(&reference, images)
}

/// Finds the single image a reference designates.
///
/// An image is a candidate when its repo and tag equal the reference's, or when
/// its ID starts with the reference's ID. For a bare token that hits exactly
/// one image by ID prefix, that image wins over any `token:latest` matches.
pub fn resolve<'a>(reference: &Reference, images: &'a [Image]) -> Result<&'a Image, RmiError> {
    let candidates: Vec<&Image> = images.iter().filter(|img| reference.matches(img)).collect();

    match candidates.as_slice() {
        [] => Err(RmiError::NotFound {
            query: reference.clone(),
        }),
        [single] => Ok(*single),
        _ => {
            if reference.is_bare() {
                let by_id: Vec<&Image> = candidates
                    .iter()
                    .copied()
                    .filter(|img| reference.matches_id(img))
                    .collect();
                if let [single] = by_id.as_slice() {
                    debug!(
                        id = %single.id,
                        query = %reference,
                        "prefixo de ID tem prioridade sobre repo:latest"
                    );
                    return Ok(*single);
                }
            }

            Err(RmiError::Ambiguous {
                query: reference.clone(),
                candidates: candidates.into_iter().cloned().collect(),
            })
        }
    }
}
