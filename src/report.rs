use core::fmt::{self, Display, Write};

use crate::record::{Record, Special};

const LABEL_WIDTH: usize = 16;
const DIVIDER: &str = "--------------------";

/// Console rendering of a record.
pub struct Report<'a>(pub &'a Record);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let mut row = |label: &str, value: &dyn Display| writeln!(f, "{label:<LABEL_WIDTH$}{value}");

        row("Name", &r.name)?;
        row("Number", &r.number)?;
        row("Classification", &r.classification)?;
        row("Height", &r.height.join(" "))?;
        row("Weight", &r.weight.join(" "))?;
        row("HP", &r.hit_points)?;
        row("Attack", &r.attack)?;
        row("Defense", &r.defense)?;
        match r.special {
            Special::Combined { special } => row("Special", &special)?,
            Special::Split { sp_att, sp_def } => {
                row("Sp. Attack", &sp_att)?;
                row("Sp. Defense", &sp_def)?;
            }
        }
        row("Speed", &r.speed)?;
        if let Some(ev) = &r.effort_values {
            row("Effort Values", ev)?;
        }
        f.write_str(DIVIDER)?;
        f.write_char('\n')
    }
}

pub fn format(record: &Record) -> String {
    Report(record).to_string()
}
