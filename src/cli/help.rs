//! Static help for the interactive session.

/// Inputs that print the help text instead of being resolved
pub const HELP_TRIGGERS: &[&str] = &["pxctl", "help", "?", "pxctl help", "pxctl --help"];

/// Inputs that end the session
pub const EXIT_COMMANDS: &[&str] = &["exit", "quit"];

pub const HELP_TEXT: &str = "
Portworx pxctl (offline diag shell)

Volume commands:
  pxctl volume list | pxctl v l
  pxctl volume list -j
  pxctl volume list -j <volume-id>
  pxctl volume inspect <volume-id> | pxctl v i <volume-id>
  pxctl volume inspect -j <volume-id>

Cluster / system:
  pxctl status
  pxctl version
  pxctl service kvdb members | pxctl sv k m
  pxctl alerts show | pxctl a s
  pxctl alerts show -j
  pxctl clouddrive list | pxctl cd l
  pxctl config show | pxctl config s
  pxctl clusteruuid show | pxctl clusteruuid s

Host commands:
  journalctl
  lsblk
  blkid
  ip addr show
  mount
  uptime
  date

Notes:
  - '-j' may appear anywhere in the command
  - Pipes supported: | grep <text> | egrep <regex> | less | more
  - Type 'exit' or 'quit' to leave
";

pub fn is_help(line: &str) -> bool {
    HELP_TRIGGERS.contains(&line)
}

pub fn is_exit(line: &str) -> bool {
    EXIT_COMMANDS.contains(&line)
}
