use crate::md::{TABLE_ENTRIES, TITLE_CELL_LEN};
use crate::toc::error::{TocError, TocResult};
use crate::toc::models::{TitleCell, Toc};
use log::debug;

/// Title cells not reachable from any entry of the title map, in ascending order.
///
/// Cell 0 is never free. Cells of a deallocated title stay linked together but become
/// free here as soon as nothing in the title map points at them.
pub fn free_title_slots(toc: &Toc) -> Vec<u8> {
    let titles = &toc.titles;
    let mut used = [false; TABLE_ENTRIES];
    used[0] = true;

    for &head in &titles.title_map {
        let mut cell = usize::from(head);
        // a visited cell means the rest of the chain is already marked
        while !used[cell] {
            used[cell] = true;
            cell = usize::from(titles.title_cell_list[cell].link);
        }
    }

    (1..=u8::MAX).filter(|&slot| !used[usize::from(slot)]).collect()
}

/// Cells needed to store an encoded title, terminator included.
pub fn title_cells_needed(encoded_len: usize) -> usize {
    (encoded_len + 1).div_ceil(TITLE_CELL_LEN)
}

/// Writes an encoded title into free cells and returns the first cell of the chain.
///
/// The caller assigns the returned cell in the title map. On [`TocError::OutOfTitleCells`]
/// the cells consumed so far have already been overwritten, so the [`Toc`] must be thrown
/// away rather than reused.
pub fn allocate_title(toc: &mut Toc, encoded: &[u8]) -> TocResult<u8> {
    let mut title = Vec::with_capacity(encoded.len() + 1);
    title.extend_from_slice(encoded);
    title.push(0);

    let mut available = free_title_slots(toc).into_iter().peekable();
    let chunk_count = title.len().div_ceil(TITLE_CELL_LEN);
    let titles = &mut toc.titles;
    let mut head = None;

    for (index, chunk) in title.chunks(TITLE_CELL_LEN).enumerate() {
        let slot = available.next().ok_or(TocError::OutOfTitleCells)?;
        head.get_or_insert(slot);

        titles.next_free_title_slot = available.peek().copied().unwrap_or(0);

        let mut text = [0u8; TITLE_CELL_LEN];
        text[..chunk.len()].copy_from_slice(chunk);
        let link = if index + 1 == chunk_count {
            0
        } else {
            titles.next_free_title_slot
        };

        debug!("Title cell {slot}: {text:02x?} -> {link}");
        titles.title_cell_list[usize::from(slot)] = TitleCell { text, link };
    }

    head.ok_or(TocError::OutOfTitleCells)
}

/// Concatenated text of the chain starting at `head`, up to the terminating zero byte.
pub fn read_title(toc: &Toc, head: u8) -> Vec<u8> {
    let cells = &toc.titles.title_cell_list;
    let mut visited = [false; TABLE_ENTRIES];
    let mut out = Vec::new();
    let mut cell = usize::from(head);

    while cell != 0 && !visited[cell] {
        visited[cell] = true;
        let TitleCell { text, link } = cells[cell];

        match text.iter().position(|&b| b == 0) {
            Some(end) => {
                out.extend_from_slice(&text[..end]);
                break;
            }
            None => out.extend_from_slice(&text),
        }

        cell = usize::from(link);
    }

    out
}
