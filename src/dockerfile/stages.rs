//! Multi-stage framing

use super::{DockerfileDraft, Instruction};
use crate::error::Result;
use std::io::Write;

fn combo_stage(index: usize) -> String {
    format!("{}{}", crate::COMBO_STAGE_PREFIX, index)
}

/// One preliminary stage per combined image, must come before the build stage
pub fn emit_combo_stages<W: Write>(images: &[String], draft: &mut DockerfileDraft<W>) -> Result<()> {
    for (index, image) in images.iter().enumerate() {
        draft.emit(Instruction::From {
            image: image.clone(),
            stage: Some(combo_stage(index)),
        })?;
    }

    Ok(())
}

pub fn emit_build_stage<W: Write>(base_image: &str, draft: &mut DockerfileDraft<W>) -> Result<()> {
    draft.emit(Instruction::From {
        image: base_image.to_string(),
        stage: Some(crate::BUILD_STAGE.to_string()),
    })
}

/// Merges the filesystem of every combined image into the build stage, in declaration order
pub fn emit_combo_copies<W: Write>(images: &[String], draft: &mut DockerfileDraft<W>) -> Result<()> {
    draft.emit_all((0..images.len()).map(|index| Instruction::copy_from(combo_stage(index), "/", "/")))
}

/// Final stage only keeps the filesystem of the build stage
pub fn emit_finalize_stage<W: Write>(draft: &mut DockerfileDraft<W>) -> Result<()> {
    draft.emit(Instruction::From { image: "scratch".into(), stage: None })?;
    draft.emit(Instruction::copy_from(crate::BUILD_STAGE, "/", "/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dockerfile::test_utils::lines_of;

    #[test]
    fn combined_images() {
        let images = vec!["first:1".to_string(), "second".to_string()];

        let lines = lines_of(|draft| {
            emit_combo_stages(&images, draft)?;
            emit_build_stage("debian", draft)?;
            emit_combo_copies(&images, draft)
        });

        assert_eq!(
            lines,
            vec![
                "FROM first:1 as combo0",
                "FROM second as combo1",
                "FROM debian as build",
                "COPY --from=combo0 / /",
                "COPY --from=combo1 / /",
            ]
        );
    }

    #[test]
    fn no_combined_images() {
        assert!(lines_of(|draft| emit_combo_stages(&[], draft)).is_empty());
        assert!(lines_of(|draft| emit_combo_copies(&[], draft)).is_empty());
    }

    #[test]
    fn finalize() {
        assert_eq!(
            lines_of(emit_finalize_stage),
            vec!["FROM scratch", "COPY --from=build / /"]
        );
    }
}
