use clap::Args;
use powersafe::Mode;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Args, Debug)]
pub struct ModesArgs {
    /// Only print mode names, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Tabled)]
struct ModeRow {
    #[tabled(rename = "MODE")]
    mode: &'static str,
    #[tabled(rename = "UNFORCED")]
    unforced: &'static str,
    #[tabled(rename = "FORCED")]
    forced: &'static str,
    #[tabled(rename = "UNMOUNT WHEN IDLE")]
    unmount: &'static str,
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub fn execute(args: ModesArgs) -> anyhow::Result<()> {
    if args.quiet {
        for mode in Mode::ALL {
            println!("{}", mode);
        }
        return Ok(());
    }

    let rows: Vec<ModeRow> = Mode::ALL
        .into_iter()
        .map(|mode| ModeRow {
            mode: mode.as_str(),
            unforced: yes_no(mode.admits(false)),
            forced: yes_no(mode.admits(true)),
            unmount: match mode {
                Mode::Disabled => "immediately",
                other => yes_no(other.unmounts_when_idle()),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::blank());
    println!("{}", table);
    Ok(())
}
