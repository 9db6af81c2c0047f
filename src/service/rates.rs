//! Static waste-material rate table. Consulted by the lifecycle engine at
//! verification time, never mutated.

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct WasteType {
    pub id: &'static str,
    pub name: &'static str,
    /// Whole rupees per kilogram.
    pub rate_per_kg: i64,
    /// Display tag for dashboards.
    pub color: &'static str,
}

pub const WASTE_RATES: &[WasteType] = &[
    WasteType {
        id: "plastic",
        name: "Plastic",
        rate_per_kg: 15,
        color: "bg-blue-500",
    },
    WasteType {
        id: "paper",
        name: "Paper",
        rate_per_kg: 14,
        color: "bg-yellow-500",
    },
    WasteType {
        id: "metal",
        name: "Metal",
        rate_per_kg: 32,
        color: "bg-slate-500",
    },
    WasteType {
        id: "glass",
        name: "Glass",
        rate_per_kg: 4,
        color: "bg-emerald-500",
    },
    WasteType {
        id: "organic",
        name: "Organic",
        rate_per_kg: 2,
        color: "bg-green-700",
    },
];

/// Per-kg rate for a material by display name. Unrecognized materials fall
/// back to a zero rate instead of failing; callers that want to reject
/// unknown materials must check first.
pub fn rate_per_kg(material: &str) -> i64 {
    WASTE_RATES
        .iter()
        .find(|w| w.name == material)
        .map(|w| w.rate_per_kg)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_materials_have_configured_rates() {
        assert_eq!(rate_per_kg("Plastic"), 15);
        assert_eq!(rate_per_kg("Paper"), 14);
        assert_eq!(rate_per_kg("Metal"), 32);
        assert_eq!(rate_per_kg("Glass"), 4);
        assert_eq!(rate_per_kg("Organic"), 2);
    }

    // Questionable default carried over from the original behavior: an
    // unknown material silently prices at zero rather than erroring, which
    // makes a typo in the material name settle for ₹0.
    #[test]
    fn unknown_material_falls_back_to_zero_rate() {
        assert_eq!(rate_per_kg("Styrofoam"), 0);
        assert_eq!(rate_per_kg("plastic"), 0); // lookup is case-sensitive
        assert_eq!(rate_per_kg(""), 0);
    }
}
