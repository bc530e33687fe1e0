//! Page renderer.
//!
//! [`render`] is pure: it turns the control values, the session dataset and
//! a timestamp into a [`RenderDescription`]. Cache handling and the clock
//! live in [`crate::domain::DashboardService`].

mod layout;

use chrono::{DateTime, SecondsFormat, Utc};
use dashboard_data::{Dataset, filter_date_range, sales_by_region, top_rows};

pub use self::layout::*;
use crate::domain::controls::{Menu, RenderControls};
use crate::domain::data_input::{
    AGE_DEFAULT, AGE_RANGE, Category, PREVIEW_ROWS, UPLOAD_EXTENSIONS,
};
use crate::domain::variant::Variant;

/// File name offered for the time series download.
pub const EXPORT_FILE_NAME: &str = "dashboard_data.csv";

/// File name offered for the product summary download.
pub const PRODUCTS_FILE_NAME: &str = "product_summary.csv";

/// Points in the visualization page walk.
pub const WALK_POINTS: usize = 30;

/// Notice emitted after a refresh or clear action.
pub const CACHE_CLEARED_NOTICE: &str = "Cache cleared!";

/// Notice emitted by the home page alert action.
pub const ALERT_NOTICE: &str = "Hello! This is an alert.";

const FOOTER_CAPTION: &str = "Footer area - Add links or contact info here";

const KPI_CARDS: [(&str, &str, &str); 4] = [
    ("Total Revenue", "$1.2M", "+12.5%"),
    ("Active Users", "45.2K", "+8.3%"),
    ("Conversion Rate", "4.8%", "+0.6%"),
    ("Avg. Order Value", "$87.50", "-2.1%"),
];

const SENSOR_CARDS: [(&str, &str, &str); 3] = [
    ("Temperature", "70°F", "1.2°F"),
    ("Pressure", "30.2 psi", "-0.5 psi"),
    ("Humidity", "65%", "3%"),
];

const HOME_FEATURES: [&str; 4] = [
    "Data visualization",
    "File upload",
    "Custom settings",
    "Real-time updates",
];

const TECH_STACK: [&str; 4] = ["Rust 2024 edition", "actix-web", "dashboard-data", "utoipa"];

/// Inputs for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub variant: Variant,
    pub controls: &'a RenderControls,
    pub dataset: &'a Dataset,
    /// Whether this pass was asked to refresh. The notice acknowledges the
    /// request even when the session had nothing cached yet.
    pub cache_cleared: bool,
    /// Cumulative walk for the visualization page; ignored elsewhere.
    pub walk: &'a [f64],
    pub rendered_at: DateTime<Utc>,
}

/// Build the layout for one pass.
///
/// Sections are always emitted as header, notices, body, footer.
#[must_use]
pub fn render(ctx: &RenderContext<'_>) -> RenderDescription {
    let sections = vec![
        Section::Header(header(ctx)),
        Section::Notices(notices(ctx)),
        Section::Body(body(ctx)),
        Section::Footer(Footer {
            caption: FOOTER_CAPTION.to_owned(),
            rendered_at: ctx.rendered_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }),
    ];
    RenderDescription {
        variant: ctx.variant,
        sections,
    }
}

fn header(ctx: &RenderContext<'_>) -> Header {
    let active = ctx.controls.menu;
    Header {
        title: ctx.variant.title().to_owned(),
        chrome: ctx.variant.chrome(),
        theme: ctx.variant.theme(ctx.controls.dark_mode),
        navigation: Menu::ALL
            .into_iter()
            .map(|menu| NavEntry {
                menu,
                label: menu.label().to_owned(),
                active: menu == active,
            })
            .collect(),
    }
}

fn notices(ctx: &RenderContext<'_>) -> Notices {
    let mut items = Vec::new();
    if ctx.cache_cleared {
        items.push(notice(NoticeLevel::Info, CACHE_CLEARED_NOTICE));
    }
    if ctx.controls.show_alert && ctx.controls.menu == Menu::Home {
        items.push(notice(NoticeLevel::Success, ALERT_NOTICE));
    }
    Notices { items }
}

fn notice(level: NoticeLevel, message: &str) -> Notice {
    Notice {
        level,
        message: message.to_owned(),
    }
}

fn body(ctx: &RenderContext<'_>) -> PageBody {
    match ctx.controls.menu {
        Menu::Dashboard => PageBody::Dashboard(dashboard_page(ctx)),
        Menu::Home => PageBody::Home(home_page()),
        Menu::DataInput => PageBody::DataInput(data_input_page()),
        Menu::Visualization => PageBody::Visualization(visualization_page(ctx.walk)),
        Menu::About => PageBody::About(about_page()),
    }
}

fn dashboard_page(ctx: &RenderContext<'_>) -> DashboardPage {
    let controls = ctx.controls;
    let filtered = filter_date_range(
        &ctx.dataset.time_series,
        controls.start_date,
        controls.end_date,
    );

    let charts = vec![
        Chart::Line(LineChart {
            title: "Revenue Trend".to_owned(),
            x_label: "date".to_owned(),
            y_label: "revenue".to_owned(),
            points: filtered
                .iter()
                .map(|row| DatePoint {
                    date: row.date,
                    value: row.revenue,
                })
                .collect(),
        }),
        Chart::Donut(DonutChart {
            title: "Market Share".to_owned(),
            slices: ctx
                .dataset
                .product_summary
                .iter()
                .map(|row| Slice {
                    label: row.product_name.clone(),
                    value: row.market_share_pct,
                })
                .collect(),
        }),
        Chart::Bar(BarChart {
            title: "Sales by Region".to_owned(),
            bars: sales_by_region(&filtered)
                .into_iter()
                .map(|group| Bar {
                    label: group.region.to_string(),
                    value: group.sales,
                })
                .collect(),
        }),
        Chart::Scatter(ScatterChart {
            title: "Conversion vs Bounce Rate".to_owned(),
            x_label: "conversion_rate".to_owned(),
            y_label: "bounce_rate".to_owned(),
            points: filtered
                .iter()
                .map(|row| XyPoint {
                    x: row.conversion_rate,
                    y: row.bounce_rate,
                })
                .collect(),
        }),
    ];

    let raw_table = controls.show_raw.then(|| RawTable {
        rows: top_rows(&filtered, controls.rows)
            .iter()
            .map(TableRow::from)
            .collect(),
    });

    DashboardPage {
        kpis: cards(&KPI_CARDS),
        charts,
        raw_table,
        export: ExportControls {
            download: link("Download CSV", "GET", "/api/v1/dashboard/export.csv"),
            file_name: EXPORT_FILE_NAME.to_owned(),
            row_count: ctx.dataset.time_series.len(),
            products: link(
                "Download product summary",
                "GET",
                "/api/v1/dashboard/products.csv",
            ),
        },
        refresh: link("Refresh data", "GET", "/api/v1/dashboard?refresh=true"),
    }
}

fn home_page() -> HomePage {
    HomePage {
        title: "Welcome to My App".to_owned(),
        intro: "This is a clean dashboard template.".to_owned(),
        features: HOME_FEATURES.iter().map(|&feature| feature.to_owned()).collect(),
        quick_actions: vec![
            link(
                "Show alert",
                "GET",
                "/api/v1/dashboard?menu=home&showAlert=true",
            ),
            link("Clear cache", "POST", "/api/v1/dashboard/cache/clear"),
        ],
    }
}

fn data_input_page() -> DataInputPage {
    let (age_min, age_max) = AGE_RANGE;
    DataInputPage {
        title: "Data Input".to_owned(),
        upload: UploadWidget {
            label: "Upload a CSV file".to_owned(),
            accepted_extensions: UPLOAD_EXTENSIONS.iter().map(|&ext| ext.to_owned()).collect(),
            preview_rows: PREVIEW_ROWS,
            submit: link("Preview", "POST", "/api/v1/uploads/preview"),
        },
        manual_entry: ManualEntryForm {
            title: "Manual Entry".to_owned(),
            fields: vec![
                FormField {
                    name: "name".to_owned(),
                    label: "Name".to_owned(),
                    input: FieldInput::Text,
                },
                FormField {
                    name: "age".to_owned(),
                    label: "Age".to_owned(),
                    input: FieldInput::Number {
                        min: age_min,
                        max: age_max,
                        default: AGE_DEFAULT,
                    },
                },
                FormField {
                    name: "category".to_owned(),
                    label: "Category".to_owned(),
                    input: FieldInput::Select {
                        options: Category::ALL
                            .iter()
                            .map(|category| category.as_str().to_owned())
                            .collect(),
                    },
                },
            ],
            submit: link("Submit", "POST", "/api/v1/manual-entry"),
        },
    }
}

fn visualization_page(walk: &[f64]) -> VisualizationPage {
    VisualizationPage {
        title: "Visualization".to_owned(),
        chart: WalkChart {
            points: (1_u32..)
                .zip(walk)
                .map(|(x, &y)| WalkPoint { x, y })
                .collect(),
        },
        metrics: cards(&SENSOR_CARDS),
    }
}

fn about_page() -> AboutPage {
    AboutPage {
        title: "About".to_owned(),
        description: "This is a template dashboard app.".to_owned(),
        tech_stack: TECH_STACK.iter().map(|&item| item.to_owned()).collect(),
        version_caption: "Version 1.0 | Last updated: 2024".to_owned(),
    }
}

fn cards(specs: &[(&str, &str, &str)]) -> Vec<KpiCard> {
    specs
        .iter()
        .map(|&(label, value, delta)| KpiCard {
            label: label.to_owned(),
            value: value.to_owned(),
            delta: delta.to_owned(),
        })
        .collect()
}

fn link(label: &str, method: &str, href: &str) -> ActionLink {
    ActionLink {
        label: label.to_owned(),
        method: method.to_owned(),
        href: href.to_owned(),
    }
}
