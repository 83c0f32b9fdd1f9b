//! Delivery status codes used by the carrier's derived status field.

/// High-level delivery state derived from the carrier's two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    InTransit,
    Initiated,
    Cancelled,
    ShipmentException,
    DeliveryException,
    Delayed,
}

impl DeliveryStatus {
    /// Map a carrier derived-status code to its delivery state.
    /// Returns `None` for codes outside the documented set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DL" => Some(Self::Delivered),
            "IT" => Some(Self::InTransit),
            "IN" => Some(Self::Initiated),
            "CA" => Some(Self::Cancelled),
            "SE" => Some(Self::ShipmentException),
            "DE" => Some(Self::DeliveryException),
            "DY" => Some(Self::Delayed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::InTransit => "In transit",
            Self::Initiated => "Initiated",
            Self::Cancelled => "Cancelled",
            Self::ShipmentException => "Shipment exception",
            Self::DeliveryException => "Delivery exception",
            Self::Delayed => "Delay",
        }
    }
}
