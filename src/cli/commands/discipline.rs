//! `noto discipline` handlers

use super::{resolve_discipline, short_id, App, CommandResult};
use crate::args::{DisciplineCommand, GradingArgs};
use noto::config::Config;
use noto::core::models::{Discipline, GradingScheme};
use noto::core::organizer::NewDiscipline;

/// Dispatch discipline subcommands
pub fn run(action: DisciplineCommand, app: &mut App, config: &Config) -> CommandResult {
    match action {
        DisciplineCommand::Add {
            name,
            professor,
            code,
            grading,
        } => {
            let added = app.add_discipline(NewDiscipline {
                name,
                professor,
                code,
                grading: scheme_from_args(&grading, None),
            })?;
            println!("✓ Added discipline {} ({})", added.name, short_id(&added.id));
        }
        DisciplineCommand::List => list(app, config),
        DisciplineCommand::Remove { id } => {
            let discipline = resolve_discipline(app.disciplines(), &id)?.clone();
            app.remove_discipline(&discipline.id)?;
            println!("✓ Removed discipline {}", discipline.name);
        }
        DisciplineCommand::Grading { id, grading, clear } => {
            let discipline = resolve_discipline(app.disciplines(), &id)?.clone();
            if clear {
                app.set_grading(&discipline.id, None)?;
                println!("✓ Cleared grading formula of {}", discipline.name);
            } else if let Some(scheme) = scheme_from_args(&grading, discipline.grading.as_ref()) {
                app.set_grading(&discipline.id, Some(scheme))?;
                println!("✓ Updated grading formula of {}", discipline.name);
            } else {
                print_scheme(&discipline, config.approval_threshold());
            }
        }
    }
    Ok(())
}

/// Build a scheme from CLI flags. New components replace the current list;
/// scale and threshold fall back to the current scheme. `None` when no flag
/// was given.
fn scheme_from_args(args: &GradingArgs, current: Option<&GradingScheme>) -> Option<GradingScheme> {
    if args.components.is_empty() && args.scale.is_none() && args.threshold.is_none() {
        return None;
    }
    let base = current.cloned().unwrap_or_default();
    Some(GradingScheme {
        components: if args.components.is_empty() {
            base.components
        } else {
            args.components.clone()
        },
        scale_max: args.scale.or(base.scale_max),
        approval_threshold: args.threshold.or(base.approval_threshold),
    })
}

fn list(app: &App, config: &Config) {
    if app.disciplines().is_empty() {
        println!("No disciplines yet. Add one with `noto discipline add <NAME>`.");
        return;
    }
    for d in app.disciplines() {
        let extra = [d.code.as_deref(), d.professor.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" • ");
        if extra.is_empty() {
            println!("{}  {}", short_id(&d.id), d.name);
        } else {
            println!("{}  {}  ({extra})", short_id(&d.id), d.name);
        }
        logger::verbose!(
            "  scale 0-{}, min {}",
            d.scale_max(),
            d.approval_threshold_or(config.approval_threshold())
        );
    }
}

fn print_scheme(discipline: &Discipline, default_threshold: f64) {
    println!("{}", discipline.name);
    match discipline.grading.as_ref().filter(|g| !g.components.is_empty()) {
        None => println!("  No grading formula"),
        Some(scheme) => {
            for c in &scheme.components {
                println!("  {:<12} {:<24} {:>5}%", c.id, c.label, c.weight);
            }
            println!(
                "  scale 0-{}, min {}",
                discipline.scale_max(),
                discipline.approval_threshold_or(default_threshold)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noto::core::models::AssessmentComponent;

    #[test]
    fn test_scheme_from_args_without_flags() {
        assert!(scheme_from_args(&GradingArgs::default(), None).is_none());
    }

    #[test]
    fn test_scheme_from_args_keeps_current_values() {
        let current = GradingScheme::new(vec![AssessmentComponent::new("p", "Provas", 100.0)])
            .with_scale_max(20.0);
        let args = GradingArgs {
            threshold: Some(12.0),
            ..GradingArgs::default()
        };

        let scheme = scheme_from_args(&args, Some(&current)).unwrap();
        assert_eq!(scheme.components, current.components);
        assert_eq!(scheme.scale_max, Some(20.0));
        assert_eq!(scheme.approval_threshold, Some(12.0));
    }
}
