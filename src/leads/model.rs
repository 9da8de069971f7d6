// src/leads/model.rs

/// Which of the two sites a lead came in through. Drives which
/// variant-specific fields exist and which statuses the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteVariant {
    Generic,
    RealEstate,
}

impl SiteVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteVariant::Generic => "generic",
            SiteVariant::RealEstate => "realestate",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "generic" => Some(SiteVariant::Generic),
            "realestate" => Some(SiteVariant::RealEstate),
            _ => None,
        }
    }

    /// The statuses an operator may assign on this site's dashboard.
    /// "Site Visit" only exists on the real-estate pipeline.
    pub fn allowed_statuses(&self) -> &'static [LeadStatus] {
        match self {
            SiteVariant::Generic => &[LeadStatus::New, LeadStatus::Contacted, LeadStatus::Closed],
            SiteVariant::RealEstate => &[
                LeadStatus::New,
                LeadStatus::Contacted,
                LeadStatus::SiteVisit,
                LeadStatus::Closed,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    New,
    Contacted,
    SiteVisit,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::SiteVisit => "Site Visit",
            LeadStatus::Closed => "Closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "New" => Some(LeadStatus::New),
            "Contacted" => Some(LeadStatus::Contacted),
            "Site Visit" => Some(LeadStatus::SiteVisit),
            "Closed" => Some(LeadStatus::Closed),
            _ => None,
        }
    }
}

/// What the visitor is looking to do / the kind of property.
/// The enquiry form offers buy/sell/rent, the landing form flat/villa/plot;
/// the dashboard has to render whichever was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Buy,
    Sell,
    Rent,
    Flat,
    Villa,
    Plot,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Buy => "buy",
            PropertyType::Sell => "sell",
            PropertyType::Rent => "rent",
            PropertyType::Flat => "flat",
            PropertyType::Villa => "villa",
            PropertyType::Plot => "plot",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(PropertyType::Buy),
            "sell" => Some(PropertyType::Sell),
            "rent" => Some(PropertyType::Rent),
            "flat" => Some(PropertyType::Flat),
            "villa" => Some(PropertyType::Villa),
            "plot" => Some(PropertyType::Plot),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Buy => "Buy",
            PropertyType::Sell => "Sell",
            PropertyType::Rent => "Rent",
            PropertyType::Flat => "Flat / Apartment",
            PropertyType::Villa => "Villa",
            PropertyType::Plot => "Plot / Land",
        }
    }
}

/// Fixed budget brackets from the enquiry form. Stored as the form codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetRange {
    Under50Lakhs,
    Lakhs50ToCr1,
    Cr1ToCr2,
    Cr2ToCr5,
    Cr5ToCr10,
    AboveCr10,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 6] = [
        BudgetRange::Under50Lakhs,
        BudgetRange::Lakhs50ToCr1,
        BudgetRange::Cr1ToCr2,
        BudgetRange::Cr2ToCr5,
        BudgetRange::Cr5ToCr10,
        BudgetRange::AboveCr10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under50Lakhs => "under-50lakhs",
            BudgetRange::Lakhs50ToCr1 => "50lakhs-1cr",
            BudgetRange::Cr1ToCr2 => "1cr-2cr",
            BudgetRange::Cr2ToCr5 => "2cr-5cr",
            BudgetRange::Cr5ToCr10 => "5cr-10cr",
            BudgetRange::AboveCr10 => "above-10cr",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "under-50lakhs" => Some(BudgetRange::Under50Lakhs),
            "50lakhs-1cr" => Some(BudgetRange::Lakhs50ToCr1),
            "1cr-2cr" => Some(BudgetRange::Cr1ToCr2),
            "2cr-5cr" => Some(BudgetRange::Cr2ToCr5),
            "5cr-10cr" => Some(BudgetRange::Cr5ToCr10),
            "above-10cr" => Some(BudgetRange::AboveCr10),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Under50Lakhs => "Under ₹50 Lakhs",
            BudgetRange::Lakhs50ToCr1 => "₹50 Lakhs - ₹1 Cr",
            BudgetRange::Cr1ToCr2 => "₹1 Cr - ₹2 Cr",
            BudgetRange::Cr2ToCr5 => "₹2 Cr - ₹5 Cr",
            BudgetRange::Cr5ToCr10 => "₹5 Cr - ₹10 Cr",
            BudgetRange::AboveCr10 => "Above ₹10 Cr",
        }
    }
}

/// Variant-specific fields, tagged by site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadDetails {
    Generic {
        company: Option<String>,
    },
    RealEstate {
        property_type: Option<PropertyType>,
        budget: Option<BudgetRange>,
        preferred_location: Option<String>,
    },
}

impl LeadDetails {
    pub fn site(&self) -> SiteVariant {
        match self {
            LeadDetails::Generic { .. } => SiteVariant::Generic,
            LeadDetails::RealEstate { .. } => SiteVariant::RealEstate,
        }
    }
}

/// A stored lead record, as delivered by a store snapshot.
///
/// `status` and the timestamps are optional because historical records may
/// predate those columns being written; readers must go through
/// [`Lead::effective_status`] rather than defaulting at each call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: Option<LeadStatus>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub details: LeadDetails,
}

impl Lead {
    /// The status used for display, filtering and aggregation.
    /// A record without one counts as New. This is the only place the
    /// default is applied.
    pub fn effective_status(&self) -> LeadStatus {
        self.status.unwrap_or(LeadStatus::New)
    }
}

/// A validated intake submission, ready for the store.
/// Status is always New at creation; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub details: LeadDetails,
}
