use super::{DockerfileDraft, Instruction};
use crate::error::Result;
use std::io::Write;

pub fn emit_environment<W: Write>(environment: &[String], draft: &mut DockerfileDraft<W>) -> Result<()> {
    draft.emit_all(environment.iter().cloned().map(Instruction::Env))
}

/// Arbitrary lines from `also`, nothing is validated
pub fn emit_raw<W: Write>(lines: &[String], draft: &mut DockerfileDraft<W>) -> Result<()> {
    draft.emit_all(lines.iter().cloned().map(Instruction::Raw))
}

pub fn emit_entry<W: Write>(entrypoint: Option<&str>, cmd: Option<&str>, draft: &mut DockerfileDraft<W>) -> Result<()> {
    if let Some(entrypoint) = entrypoint {
        draft.emit(Instruction::Entrypoint(entrypoint.to_string()))?;
    }

    if let Some(cmd) = cmd {
        draft.emit(Instruction::Cmd(cmd.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dockerfile::test_utils::lines_of;

    #[test]
    fn environment_in_order() {
        let env = vec!["B=2".to_string(), "A=1".to_string()];

        assert_eq!(lines_of(|draft| emit_environment(&env, draft)), vec!["ENV B=2", "ENV A=1"]);
    }

    #[test]
    fn raw_is_verbatim() {
        let also = vec!["EXPOSE 8080".to_string(), "  LABEL a=b  ".to_string(), "# comment".to_string()];

        assert_eq!(lines_of(|draft| emit_raw(&also, draft)), also);
    }

    #[test]
    fn entry() {
        assert_eq!(
            lines_of(|draft| emit_entry(Some("/app"), Some("run"), draft)),
            vec![r#"ENTRYPOINT ["/app"]"#, r#"CMD ["run"]"#]
        );
        assert_eq!(lines_of(|draft| emit_entry(None, Some("run"), draft)), vec![r#"CMD ["run"]"#]);
        assert!(lines_of(|draft| emit_entry(None, None, draft)).is_empty());
    }
}
