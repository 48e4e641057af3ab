/// Static dashboard configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,

    /// Rows per report page
    pub page_size: usize,

    pub commission_report: ReportPreset,
}

/// Field layout of a reporting extract
pub struct ReportPreset {
    pub title: &'static str,
    pub key_field: &'static str,
    pub key_label: &'static str,
    pub volume_field: &'static str,
    pub date_field: Option<&'static str>,
    pub categories: &'static [CategoryPreset],
}

pub struct CategoryPreset {
    pub name: &'static str,
    pub label: &'static str,
    pub estimated_field: &'static str,
    pub actual_field: &'static str,
}

pub static CONFIG: Config = Config {
    name: "Creator Admin",
    tagline: "Orders, catalog and creator commissions",

    page_size: 10,

    commission_report: ReportPreset {
        title: "Creator commissions",
        key_field: "creator_name",
        key_label: "Creator",
        volume_field: "gmv",
        date_field: Some("order_date"),

        // Column order in the report, left to right
        categories: &[
            CategoryPreset {
                name: "standard",
                label: "Standard",
                estimated_field: "estimated_standard_commission",
                actual_field: "actual_standard_commission",
            },
            CategoryPreset {
                name: "shop_ads",
                label: "Shop Ads",
                estimated_field: "estimated_shop_ads_commission",
                actual_field: "actual_shop_ads_commission",
            },
            CategoryPreset {
                name: "bonus",
                label: "Bonus",
                estimated_field: "estimated_bonus",
                actual_field: "actual_bonus",
            },
        ],
    },
};
