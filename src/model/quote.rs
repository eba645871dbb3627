/// Base price used when the service key is not in the table
pub const DEFAULT_BASE_PRICE: f64 = 1000.0;
pub const EMERGENCY_MULTIPLIER: f64 = 1.5;

/// Quoted range around the point estimate
const LOW_FACTOR: f64 = 0.8;
const HIGH_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Furnace,
    AirConditioning,
    WaterHeater,
    CommercialHvac,
    Refrigeration,
    Maintenance,
}

impl ServiceType {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "furnace" => Some(Self::Furnace),
            "ac" => Some(Self::AirConditioning),
            "water-heater" => Some(Self::WaterHeater),
            "commercial-hvac" => Some(Self::CommercialHvac),
            "refrigeration" => Some(Self::Refrigeration),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    pub fn base_price(self) -> f64 {
        match self {
            Self::Furnace => 3000.0,
            Self::AirConditioning => 2500.0,
            Self::WaterHeater => 1500.0,
            Self::CommercialHvac => 8000.0,
            Self::Refrigeration => 5000.0,
            Self::Maintenance => 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySize {
    Small,
    Medium,
    Large,
    Commercial,
}

impl PropertySize {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Small => 0.8,
            Self::Medium => 1.0,
            Self::Large => 1.4,
            Self::Commercial => 2.5,
        }
    }
}

/// Rough cost range shown to the visitor, in whole dollars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub low: u64,
    pub high: u64,
}

impl Estimate {
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="estimate-result">
    <h4>Estimated Cost Range</h4>
    <p class="estimate-price">${} - ${}</p>
    <p class="estimate-note">*This is a rough estimate. Final pricing depends on specific requirements and site conditions.</p>
</div>"#,
            self.low, self.high
        )
    }
}

/// Price a job from the raw select values.
///
/// Returns `None` until both service and size are chosen. Unknown keys fall
/// back to the default base price and a neutral size multiplier.
pub fn estimate(service: &str, size: &str, urgency: Option<&str>) -> Option<Estimate> {
    if service.is_empty() || size.is_empty() {
        return None;
    }

    let base = ServiceType::from_key(service)
        .map(ServiceType::base_price)
        .unwrap_or(DEFAULT_BASE_PRICE);
    let size_multiplier = PropertySize::from_key(size)
        .map(PropertySize::multiplier)
        .unwrap_or(1.0);
    let urgency_multiplier = if urgency == Some("emergency") {
        EMERGENCY_MULTIPLIER
    } else {
        1.0
    };

    let point = base * size_multiplier * urgency_multiplier;
    Some(Estimate {
        low: (point * LOW_FACTOR).floor() as u64,
        high: (point * HIGH_FACTOR).floor() as u64,
    })
}
