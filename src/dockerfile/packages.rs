//! OS packages and emi groups

use super::{DockerfileDraft, Instruction};
use crate::error::Result;
use crate::resolve::TargetOs;
use std::collections::BTreeMap;
use std::io::Write;

fn update_preamble(os: TargetOs) -> Vec<Instruction> {
    match os {
        TargetOs::Debian => vec![
            Instruction::Env("DEBIAN_FRONTEND=noninteractive".into()),
            Instruction::run("apt update"),
        ],
        TargetOs::Alpine => vec![Instruction::run("apk update")],
    }
}

fn install(os: TargetOs, package: &str) -> Instruction {
    match os {
        TargetOs::Debian => Instruction::run(format!("apt install -y --no-install-recommends {package}")),
        TargetOs::Alpine => Instruction::run(format!("apk add {package}")),
    }
}

fn cleanup(os: TargetOs) -> Instruction {
    match os {
        TargetOs::Debian => Instruction::run("rm -rf /var/lib/apt/lists/*"),
        TargetOs::Alpine => Instruction::run("rm -rf /var/cache/apk/*"),
    }
}

/// Update, one install per package, then cleanup; nothing when there are no packages
pub fn emit_packages<W: Write>(os: TargetOs, packages: &[String], draft: &mut DockerfileDraft<W>) -> Result<()> {
    if packages.is_empty() {
        return Ok(());
    }

    log::debug!("Installing {} packages using {} syntax", packages.len(), os);

    draft.emit_all(update_preamble(os))?;
    draft.emit_all(packages.iter().map(|x| install(os, x)))?;
    draft.emit(cleanup(os))
}

/// One emi invocation per group followed by a single cleanup
pub fn emit_install_groups<W: Write>(groups: &BTreeMap<String, Vec<String>>, draft: &mut DockerfileDraft<W>) -> Result<()> {
    if groups.is_empty() {
        return Ok(());
    }

    for (label, packages) in groups {
        let mut cmd = format!("{} --label {}", crate::EMI_COMMAND, label);
        for package in packages {
            cmd.push(' ');
            cmd.push_str(package);
        }

        draft.emit(Instruction::run(cmd))?;
    }

    draft.emit(Instruction::run(format!("rm -rf {}", crate::EMI_CLEANUP_PATHS.join(" "))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dockerfile::test_utils::lines_of;

    fn packages() -> Vec<String> {
        vec!["curl".into(), "ca-certificates".into(), "git".into()]
    }

    #[test]
    fn debian() {
        assert_eq!(
            lines_of(|draft| emit_packages(TargetOs::Debian, &packages(), draft)),
            vec![
                "ENV DEBIAN_FRONTEND=noninteractive",
                "RUN apt update",
                "RUN apt install -y --no-install-recommends curl",
                "RUN apt install -y --no-install-recommends ca-certificates",
                "RUN apt install -y --no-install-recommends git",
                "RUN rm -rf /var/lib/apt/lists/*",
            ]
        );
    }

    #[test]
    fn alpine() {
        assert_eq!(
            lines_of(|draft| emit_packages(TargetOs::Alpine, &packages(), draft)),
            vec![
                "RUN apk update",
                "RUN apk add curl",
                "RUN apk add ca-certificates",
                "RUN apk add git",
                "RUN rm -rf /var/cache/apk/*",
            ]
        );
    }

    #[test]
    fn no_packages() {
        assert!(lines_of(|draft| emit_packages(TargetOs::Debian, &[], draft)).is_empty());
    }

    #[test]
    fn install_groups() {
        let groups = BTreeMap::from([
            ("web".to_string(), vec!["nginx".to_string(), "certbot".to_string()]),
            ("build".to_string(), vec!["make".to_string()]),
        ]);

        assert_eq!(
            lines_of(|draft| emit_install_groups(&groups, draft)),
            vec![
                "RUN emi --label build make",
                "RUN emi --label web nginx certbot",
                "RUN rm -rf /tmp/* /var/cache/emi",
            ]
        );
    }

    #[test]
    fn no_install_groups() {
        assert!(lines_of(|draft| emit_install_groups(&BTreeMap::new(), draft)).is_empty());
    }
}
