// linkr/src/cli/display.rs

use crate::domain::link::Link;
use std::io::{self, Write};

// Column widths are minimum paddings; longer values push the border out.
const INDEX_WIDTH: usize = 2;
const CATEGORY_WIDTH: usize = 10;
const GROUP_WIDTH: usize = 10;
const NAME_WIDTH: usize = 20;
const DESCRIPTION_WIDTH: usize = 40;

/// `|index|category|group|name|description|`
pub fn format_row(index: usize, link: &Link) -> String {
    format!(
        "|{:<iw$}|{:<cw$}|{:<gw$}|{:<nw$}|{:<dw$}|",
        index,
        link.category,
        link.group,
        link.name,
        link.description,
        iw = INDEX_WIDTH,
        cw = CATEGORY_WIDTH,
        gw = GROUP_WIDTH,
        nw = NAME_WIDTH,
        dw = DESCRIPTION_WIDTH,
    )
}

/// Print each link with the index it has in the full collection
pub fn show_links<'a, W, I>(out: &mut W, links: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (usize, &'a Link)>,
{
    for (index, link) in links {
        writeln!(out, "{}", format_row(index, link))?;
    }
    Ok(())
}
