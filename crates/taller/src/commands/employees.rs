//! Employee command handlers.

use tabled::Tabled;

use taller_core::resource::{Employees, Orders};
use taller_core::{Console, Employee};

use crate::cli::{EmployeesArgs, EmployeesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{Painter, detail_lines, money, or_dash};

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nombre")]
    name: String,
    #[tabled(rename = "Teléfono")]
    phone: String,
    #[tabled(rename = "Correo")]
    email: String,
    #[tabled(rename = "Contratado")]
    hired: String,
    #[tabled(rename = "Salario")]
    salary: String,
    #[tabled(rename = "Rol")]
    role: String,
}

impl Present for Employees {
    type Row = EmployeeRow;

    fn row(e: &Employee, _: Painter) -> EmployeeRow {
        EmployeeRow {
            id: e.id.to_string(),
            name: e.full_name(),
            phone: e.phone.clone(),
            email: e.email.clone(),
            hired: or_dash(e.hired_at.map(|d| d.date())),
            salary: money(e.salary),
            role: or_dash(e.role_id),
        }
    }

    fn detail(e: &Employee, _: Painter) -> String {
        detail_lines(&[
            ("ID", e.id.to_string()),
            ("Nombre", e.full_name()),
            ("Teléfono", e.phone.clone()),
            ("Correo", e.email.clone()),
            ("Contratado", or_dash(e.hired_at)),
            ("Salario", money(e.salary)),
            ("Rol", or_dash(e.role_id)),
        ])
    }
}

pub async fn handle(console: &Console, args: EmployeesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        EmployeesCommand::List => crud::list::<Employees>(console, global).await,

        EmployeesCommand::Crud(cmd) => crud::handle::<Employees>(console, cmd, global).await,

        EmployeesCommand::Assignments { id } => {
            let orders = console.employee_assignments(util::id(id)).await?;
            crud::print_list::<Orders>(&orders, global)
        }

        EmployeesCommand::Available => {
            let employees = console.available_employees().await?;
            crud::print_list::<Employees>(&employees, global)
        }
    }
}
