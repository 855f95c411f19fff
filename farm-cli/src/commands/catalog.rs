//! Command catalogue
//!
//! Lists the command table and describes single commands.

use anyhow::{Context, Result, bail};
use colored::*;
use farm_core::domain::{StatusTone, status_tone};
use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};
use farm_command::CommandRegistry;

/// List commands, optionally for a single noun
pub fn list_commands(registry: &CommandRegistry, noun: Option<&str>) -> Result<()> {
    let nouns: Vec<Noun> = match noun {
        Some(name) => match Noun::parse(name) {
            Some(noun) => vec![noun],
            None => bail!(
                "unknown noun '{}'; expected one of: {}",
                name,
                Noun::ALL
                    .iter()
                    .map(Noun::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
        None => Noun::ALL.to_vec(),
    };

    print!("{}", render_list(registry, &nouns));
    Ok(())
}

/// Describe a single command
pub fn describe_command(registry: &CommandRegistry, name: &str) -> Result<()> {
    let definition = registry
        .get(name)
        .with_context(|| format!("unknown command '{}'; run `farm commands` to list them", name))?;

    print!("{}", render_definition(definition));
    Ok(())
}

fn render_list(registry: &CommandRegistry, nouns: &[Noun]) -> String {
    let mut out = String::new();

    for noun in nouns {
        out.push_str(&format!("{}\n", noun.as_str().bold()));
        for definition in registry.by_noun(*noun) {
            out.push_str(&format!(
                "  {} {:<30} {}\n",
                "▸".cyan(),
                definition.name,
                definition.synopsis.dimmed()
            ));
        }
        out.push('\n');
    }

    out
}

fn render_definition(definition: &CommandDefinition) -> String {
    let mut out = format!("{}\n  {}\n\n", definition.name.bold(), definition.synopsis);

    out.push_str(&format!("{}\n", "Parameters:".bold()));
    for param in definition.params {
        out.push_str(&render_param(param));
    }

    out.push_str(&format!("\n{}\n", "Output:".bold()));
    out.push_str(&format!("    Default:      {}\n", definition.default_select.cyan()));
    if definition.response_fields.is_empty() {
        out.push_str(&format!("    Fields:       {}\n", "(none)".dimmed()));
    } else {
        out.push_str(&format!(
            "    Fields:       {}\n",
            definition.response_fields.join(", ")
        ));
    }
    if definition.cancellable {
        out.push_str(&format!("    Cancellable:  {}\n", "yes (Ctrl-C)".yellow()));
    }

    out
}

fn render_param(param: &ParamDescriptor) -> String {
    let kind = match param.kind {
        ParamKind::Enum(variants) => variants
            .iter()
            .map(|variant| colorize_value(variant).to_string())
            .collect::<Vec<_>>()
            .join("|"),
        other => other.to_string(),
    };

    let mut line = format!("  --{} <{}>", param.name.cyan(), kind);
    if param.required {
        line.push_str(&format!(" {}", "required".red()));
    }
    if !param.aliases.is_empty() {
        line.push_str(&format!(
            " {}",
            format!("(alias: {})", param.aliases.join(", ")).dimmed()
        ));
    }
    line.push_str(&format!("\n      {}\n", param.help));
    line
}

/// Colorize a status value for display
fn colorize_value(value: &str) -> ColoredString {
    match status_tone(value) {
        Some(StatusTone::Good) => value.green(),
        Some(StatusTone::Pending) => value.yellow(),
        Some(StatusTone::Bad) => value.red(),
        Some(StatusTone::Neutral) | None => value.normal(),
    }
}
