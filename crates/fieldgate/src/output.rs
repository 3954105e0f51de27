use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use fieldgate_wire::Report;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    rank: &'static str,
    rank_code: i64,
    msgcat: &'static str,
    msgcat_code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    appcat: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<i64>,
    src: &'a str,
}

pub fn print_report(report: &Report, format: OutputFormat) {
    let app = report.app;
    match format {
        OutputFormat::Json => {
            let out = ReportOutput {
                rank: report.rank.name(),
                rank_code: report.rank.code(),
                msgcat: report.msgcat.name(),
                msgcat_code: report.msgcat.code(),
                appcat: app.map(|p| p.cat.name()),
                value: app.map(|p| p.value),
                src: report.src.as_str(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["RANK", "MSGCAT", "APPCAT", "VALUE", "SRC"])
                .add_row(vec![
                    report.rank.name().to_string(),
                    report.msgcat.name().to_string(),
                    app.map_or_else(|| "-".to_string(), |p| p.cat.name().to_string()),
                    app.map_or_else(|| "-".to_string(), |p| p.value.to_string()),
                    report.src.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => match app {
            Some(p) => println!(
                "rank={} msgcat={} appcat={} value={} src={}",
                report.rank.name(),
                report.msgcat.name(),
                p.cat.name(),
                p.value,
                report.src
            ),
            None => println!(
                "rank={} msgcat={} src={}",
                report.rank.name(),
                report.msgcat.name(),
                report.src
            ),
        },
    }
}
