//! Generic list/get/create/update/delete handling.
//!
//! Every mutation goes through a `CrudController`, so the CLI gets the
//! same draft validation, confirmation gate and refetch as any other
//! front end. Resource modules only describe how to present their rows.

use secrecy::ExposeSecret;
use serde::Serialize;
use tabled::Tabled;

use taller_core::{Console, CrudController, Draft, Resource, ResourceService};

use crate::cli::{CrudCommand, FieldArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Presentation ────────────────────────────────────────────────────

/// How a resource's entities appear on screen.
pub trait Present: Resource<Entity: Serialize> {
    type Row: Tabled;

    fn row(entity: &Self::Entity, painter: Painter) -> Self::Row;

    fn detail(entity: &Self::Entity, painter: Painter) -> String;
}

pub fn print_list<R: Present>(items: &[R::Entity], global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(global.color);
    let out = output::render_list(
        global.output,
        items,
        |e| R::row(e, painter),
        |e| R::id(e).to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn print_one<R: Present>(entity: &R::Entity, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        entity,
        |e| R::detail(e, painter),
        |e| R::id(e).to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Operations ──────────────────────────────────────────────────────

/// Fetch the list through a fresh controller, filtered by `--filter`.
pub async fn fetch_all<R: Resource>(
    console: &Console,
    global: &GlobalOpts,
) -> Result<Vec<R::Entity>, CliError> {
    let mut controller = console.controller::<R>().with_params(global.filters.clone());
    let bar = output::spinner(&format!("Loading {} records", R::KIND), global.quiet);
    let result = controller.refresh().await;
    bar.finish_and_clear();
    result?;
    Ok(controller.state().items)
}

pub async fn list<R: Present>(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let items = fetch_all::<R>(console, global).await?;
    print_list::<R>(&items, global)
}

pub async fn handle<R: Present>(
    console: &Console,
    cmd: CrudCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut controller = console.controller::<R>();

    match cmd {
        CrudCommand::Get { id } => {
            let entity = controller.service().get(util::id(id)).await?;
            print_one::<R>(&entity, global)
        }

        CrudCommand::Create(fields) => {
            controller.begin_create();
            fill(&mut controller, &fields)?;
            let written = submit(&mut controller, global).await?;
            report_written::<R>(written.as_ref(), "Created", global)
        }

        CrudCommand::Update { id, fields } => {
            if fields.fields.is_empty() && !fields.interactive {
                return Err(CliError::Validation {
                    field: "set".into(),
                    reason: "nothing to change; pass --set FIELD=VALUE or --interactive".into(),
                });
            }
            controller.begin_edit_by_id(util::id(id)).await?;
            fill(&mut controller, &fields)?;
            let written = submit(&mut controller, global).await?;
            report_written::<R>(written.as_ref(), "Updated", global)
        }

        CrudCommand::Delete { id } => {
            let id = util::id(id);
            let approved = util::confirm(
                &format!("Delete {} {id}?", R::KIND),
                &format!("delete {}", R::KIND),
                global.yes,
            )?;
            if controller.remove(id, |_| approved).await? {
                if !global.quiet {
                    eprintln!("✓ Deleted {} {id}", R::KIND);
                }
            } else if !global.quiet {
                eprintln!("Nothing deleted");
            }
            Ok(())
        }
    }
}

/// Copy `--set` assignments (and, with `--interactive`, prompted values)
/// into the controller's draft.
fn fill<R: Resource>(controller: &mut CrudController<R>, args: &FieldArgs) -> Result<(), CliError> {
    if args.interactive {
        let draft = controller.state().draft.unwrap_or_default();
        for &field in <R::Draft as Draft>::FIELDS {
            let label = if R::REQUIRED_FIELDS.contains(&field) {
                format!("{field} *")
            } else {
                field.to_owned()
            };
            let value = if is_secret(field) {
                util::prompt_secret(&label)?.expose_secret().to_owned()
            } else {
                util::prompt_text(&label, draft.field(field).unwrap_or_default())?
            };
            controller.update_draft_field(field, value)?;
        }
    }
    for (field, value) in &args.fields {
        controller.update_draft_field(field, value.clone())?;
    }
    Ok(())
}

fn is_secret(field: &str) -> bool {
    field.to_ascii_lowercase().contains("contras")
}

async fn submit<R: Resource>(
    controller: &mut CrudController<R>,
    global: &GlobalOpts,
) -> Result<Option<R::Entity>, CliError> {
    let bar = output::spinner(&format!("Saving {}", R::KIND), global.quiet);
    let result = controller.submit().await;
    bar.finish_and_clear();
    Ok(result?)
}

fn report_written<R: Present>(
    written: Option<&R::Entity>,
    verb: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match written {
        Some(entity) => {
            if !global.quiet && global.output == crate::cli::OutputFormat::Table {
                eprintln!("✓ {verb} {} {}", R::KIND, R::id(entity));
            }
            print_one::<R>(entity, global)
        }
        None => {
            if !global.quiet {
                eprintln!("✓ {verb} {}", R::KIND);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_fields_are_prompted_without_echo() {
        assert!(is_secret("contrasena"));
        assert!(is_secret("confirmarContrasena"));
        assert!(is_secret("contrasenia"));
        assert!(!is_secret("correo"));
    }
}
