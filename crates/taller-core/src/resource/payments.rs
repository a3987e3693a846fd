// Payment resource

use taller_api::models::{PaymentPayload, PaymentRecord};
use taller_api::resources::PAYMENTS;

use super::{Resource, opt_text, parse_amount, parse_date_field, parse_number};
use crate::convert::format_date;
use crate::error::CoreError;
use crate::model::{EntityId, Payment, PaymentMethod};

/// Marker for the payment resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payments;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDraft {
    pub id_orden: String,
    pub monto: String,
    pub fecha_pago: String,
    pub metodo_pago: String,
    pub referencia: String,
}

super::impl_draft!(PaymentDraft {
    "idOrden" => id_orden,
    "monto" => monto,
    "fechaPago" => fecha_pago,
    "metodoPago" => metodo_pago,
    "referencia" => referencia,
});

impl Resource for Payments {
    type Entity = Payment;
    type Draft = PaymentDraft;
    type Record = PaymentRecord;
    type Payload = PaymentPayload;

    const KIND: &'static str = "payment";
    const ENDPOINT: &'static str = PAYMENTS;
    const REQUIRED_FIELDS: &'static [&'static str] = &["idOrden", "monto", "fechaPago", "metodoPago"];

    fn id(entity: &Payment) -> EntityId {
        entity.id
    }

    fn new_draft() -> PaymentDraft {
        PaymentDraft {
            fecha_pago: format_date(chrono::Local::now().date_naive()),
            metodo_pago: PaymentMethod::Cash.to_string(),
            ..PaymentDraft::default()
        }
    }

    fn draft_from(p: &Payment) -> PaymentDraft {
        PaymentDraft {
            id_orden: opt_text(p.order_id),
            monto: p.amount.to_string(),
            fecha_pago: p.paid_on.map(format_date).unwrap_or_default(),
            metodo_pago: p.method.to_string(),
            referencia: p.reference.clone().unwrap_or_default(),
        }
    }

    fn to_payload(d: &PaymentDraft, editing: Option<EntityId>) -> Result<PaymentPayload, CoreError> {
        let monto = parse_amount("monto", &d.monto)?;
        if monto <= 0.0 {
            return Err(CoreError::validation("monto: must be greater than zero"));
        }
        let metodo = PaymentMethod::from(d.metodo_pago.trim().to_owned());
        // Stored free-text methods are sent back as-is on update.
        if editing.is_none() && !metodo.is_known() {
            let allowed: Vec<String> = PaymentMethod::ALL.iter().map(ToString::to_string).collect();
            return Err(CoreError::validation(format!(
                "metodoPago: expected one of: {}",
                allowed.join(", ")
            )));
        }

        Ok(PaymentPayload {
            id_orden: parse_number("idOrden", &d.id_orden)?,
            monto,
            fecha_pago: format_date(parse_date_field("fechaPago", &d.fecha_pago)?),
            metodo_pago: metodo.to_string(),
            referencia: d.referencia.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::Draft;

    #[test]
    fn amount_must_be_positive() {
        let mut d = Payments::new_draft();
        d.set("idOrden", "3").unwrap();
        d.set("monto", "0").unwrap();
        assert!(Payments::to_payload(&d, None).is_err());
        d.set("monto", "450.75").unwrap();
        let payload = Payments::to_payload(&d, None).unwrap();
        assert_eq!(payload.metodo_pago, "Efectivo");
    }

    #[test]
    fn method_is_normalized_to_label() {
        let mut d = Payments::new_draft();
        d.set("idOrden", "3").unwrap();
        d.set("monto", "100").unwrap();
        d.set("metodoPago", "transferencia bancaria").unwrap();
        let payload = Payments::to_payload(&d, None).unwrap();
        assert_eq!(payload.metodo_pago, "Transferencia Bancaria");

        d.set("metodoPago", "Trueque").unwrap();
        assert!(Payments::to_payload(&d, None).is_err());
    }

    fn stored(method: &str) -> Payment {
        Payment {
            id: EntityId::new(21),
            order_id: Some(EntityId::new(7)),
            amount: 1250.5,
            paid_on: crate::convert::parse_date("2024-06-30"),
            method: PaymentMethod::from(method.to_owned()),
            reference: Some("F-0042".into()),
        }
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let payment = stored("efectivo");
        let d = Payments::draft_from(&payment);
        let payload = Payments::to_payload(&d, Some(payment.id)).unwrap();
        assert_eq!(payload.id_orden, 7);
        assert!((payload.monto - 1250.5).abs() < f64::EPSILON);
        assert_eq!(payload.fecha_pago, "2024-06-30");
        assert_eq!(payload.metodo_pago, "Efectivo");
        assert_eq!(payload.referencia, "F-0042");
    }

    #[test]
    fn free_text_method_survives_an_edit() {
        let payment = stored("Tarjeta");
        let d = Payments::draft_from(&payment);
        let payload = Payments::to_payload(&d, Some(payment.id)).unwrap();
        assert_eq!(payload.metodo_pago, "Tarjeta");
        assert!(Payments::to_payload(&d, None).unwrap_err().is_validation());
    }
}
