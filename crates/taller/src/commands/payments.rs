//! Payment command handlers.

use tabled::Tabled;

use taller_core::resource::Payments;
use taller_core::{Console, Draft, Payment, Resource};

use crate::cli::{GlobalOpts, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output::{Painter, detail_lines, money, or_dash};

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Orden")]
    order: String,
    #[tabled(rename = "Monto")]
    amount: String,
    #[tabled(rename = "Fecha")]
    paid_on: String,
    #[tabled(rename = "Método")]
    method: String,
    #[tabled(rename = "Referencia")]
    reference: String,
}

impl Present for Payments {
    type Row = PaymentRow;

    fn row(p: &Payment, _: Painter) -> PaymentRow {
        PaymentRow {
            id: p.id.to_string(),
            order: or_dash(p.order_id),
            amount: money(p.amount),
            paid_on: or_dash(p.paid_on),
            method: p.method.to_string(),
            reference: or_dash(p.reference.as_deref()),
        }
    }

    fn detail(p: &Payment, _: Painter) -> String {
        detail_lines(&[
            ("ID", p.id.to_string()),
            ("Orden", or_dash(p.order_id)),
            ("Monto", money(p.amount)),
            ("Fecha", or_dash(p.paid_on)),
            ("Método", p.method.to_string()),
            ("Referencia", or_dash(p.reference.as_deref())),
        ])
    }
}

pub async fn handle(console: &Console, args: PaymentsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PaymentsCommand::List => crud::list::<Payments>(console, global).await,

        PaymentsCommand::Crud(cmd) => crud::handle::<Payments>(console, cmd, global).await,

        PaymentsCommand::ByOrder { id } => {
            let payments = console.payments_for_order(util::id(id)).await?;
            crud::print_list::<Payments>(&payments, global)
        }

        PaymentsCommand::Process(fields) => {
            // Same defaults (today, cash) as the regular payment form.
            let mut draft = Payments::new_draft();
            if fields.interactive {
                for &field in <<Payments as Resource>::Draft as Draft>::FIELDS {
                    let current = draft.field(field).unwrap_or_default().to_owned();
                    let value = util::prompt_text(field, &current)?;
                    draft.set(field, value)?;
                }
            }
            for (field, value) in fields.fields {
                draft.set(&field, value)?;
            }

            match console.process_payment(&draft).await? {
                Some(payment) => {
                    if !global.quiet {
                        eprintln!("✓ Processed payment {}", payment.id);
                    }
                    crud::print_one::<Payments>(&payment, global)
                }
                None => {
                    if !global.quiet {
                        eprintln!("✓ Payment processed");
                    }
                    Ok(())
                }
            }
        }
    }
}
