//! Completions command implementation
//!
//! Handles the `asp-tier-sizer completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Writes the completion script for `shell` to `out`. The binary wires this
/// to stdout so users can redirect it into their shell's completion
/// directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// asp-tier-sizer completions bash > /etc/bash_completion.d/asp-tier-sizer
///
/// # Zsh
/// asp-tier-sizer completions zsh > ~/.zfunc/_asp-tier-sizer
///
/// # Fish
/// asp-tier-sizer completions fish > ~/.config/fish/completions/asp-tier-sizer.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
