//! At most one representative image per restaurant

use super::ValidationError;

/// Check whether an image may carry the representative flag.
///
/// `candidate` is the image being saved (`None` when it has no id yet) and
/// `flagged` the ids of the restaurant's images that currently have the
/// flag set. The candidate itself is ignored, so re-saving the existing
/// representative image succeeds.
pub fn ensure_single_representative(
    candidate: Option<i64>,
    is_representative: bool,
    flagged: &[i64],
) -> Result<(), ValidationError> {
    if !is_representative {
        return Ok(());
    }

    let others = flagged
        .iter()
        .filter(|&&id| Some(id) != candidate)
        .count();

    if others > 0 {
        return Err(ValidationError::RepresentativeImageTaken);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_representative_allowed() {
        assert!(ensure_single_representative(None, true, &[]).is_ok());
    }

    #[test]
    fn second_representative_rejected() {
        assert_eq!(
            ensure_single_representative(None, true, &[7]),
            Err(ValidationError::RepresentativeImageTaken)
        );
        assert_eq!(
            ensure_single_representative(Some(8), true, &[7]),
            Err(ValidationError::RepresentativeImageTaken)
        );
    }

    #[test]
    fn resaving_current_representative_allowed() {
        assert!(ensure_single_representative(Some(7), true, &[7]).is_ok());
    }

    #[test]
    fn non_representative_always_allowed() {
        assert!(ensure_single_representative(None, false, &[1, 2]).is_ok());
        assert!(ensure_single_representative(Some(3), false, &[1]).is_ok());
    }
}
