//! Text persistence for bifurcation datasets.
//!
//! The format is consumed by external plotting tools: the first line is
//! the integer branch count `B`, followed by `B` groups of
//! `forcing,root` lines (comma separated, no spaces), each group
//! terminated by a single blank line even when the group is empty.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};

use crate::sweep::{BifurcationDataset, Branch};

/// Writes the dataset's branches in the plotting text format.
pub fn write_branches<W: Write>(mut writer: W, dataset: &BifurcationDataset) -> Result<()> {
    writeln!(writer, "{}", dataset.branches.len()).context("Failed to write branch count.")?;
    for branch in &dataset.branches {
        for (forcing, root) in branch.pairs() {
            writeln!(writer, "{forcing},{root}").context("Failed to write branch entry.")?;
        }
        writeln!(writer).context("Failed to write group terminator.")?;
    }
    Ok(())
}

/// Reads branches previously written by [`write_branches`].
///
/// The extrema boundaries are not part of the format, so only the
/// branch contents are recovered.
pub fn read_branches<R: BufRead>(reader: R) -> Result<Vec<Branch>> {
    let mut lines = reader.lines();

    let count_line = lines
        .next()
        .ok_or_else(|| anyhow!("Missing branch count line."))?
        .context("Failed to read branch count line.")?;
    let count: usize = count_line
        .trim()
        .parse()
        .with_context(|| format!("Invalid branch count: {count_line:?}"))?;

    let mut branches = Vec::with_capacity(count);
    for group in 0..count {
        let mut branch = Branch::default();
        loop {
            let line = match lines.next() {
                Some(line) => line.context("Failed to read branch entry line.")?,
                None => bail!("Unexpected end of stream in branch group {group}."),
            };
            if line.is_empty() {
                break;
            }
            let (forcing, root) = line
                .split_once(',')
                .ok_or_else(|| anyhow!("Malformed branch entry: {line:?}"))?;
            branch.forcings.push(
                forcing
                    .parse()
                    .with_context(|| format!("Invalid forcing value: {forcing:?}"))?,
            );
            branch.roots.push(
                root.parse()
                    .with_context(|| format!("Invalid root value: {root:?}"))?,
            );
        }
        branches.push(branch);
    }

    Ok(branches)
}

#[cfg(test)]
mod tests {
    use super::{read_branches, write_branches};
    use crate::sweep::{BifurcationDataset, Branch};

    fn sample_dataset() -> BifurcationDataset {
        BifurcationDataset {
            boundaries: vec![263.9],
            branches: vec![
                Branch {
                    forcings: vec![-1.0, 0.0, 1.0],
                    roots: vec![231.5, 232.75, 234.125],
                },
                Branch {
                    forcings: vec![0.0],
                    roots: vec![289.0625],
                },
            ],
        }
    }

    #[test]
    fn written_form_matches_the_plotting_format() {
        let mut buffer = Vec::new();
        write_branches(&mut buffer, &sample_dataset()).expect("write should succeed");
        let text = String::from_utf8(buffer).expect("output is utf8");
        assert_eq!(
            text,
            "2\n-1,231.5\n0,232.75\n1,234.125\n\n0,289.0625\n\n"
        );
    }

    #[test]
    fn empty_groups_still_get_a_terminator() {
        let dataset = BifurcationDataset {
            boundaries: vec![1.0],
            branches: vec![Branch::default(), Branch::default()],
        };
        let mut buffer = Vec::new();
        write_branches(&mut buffer, &dataset).expect("write should succeed");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "2\n\n\n");
    }

    #[test]
    fn round_trip_preserves_branches() {
        let dataset = sample_dataset();
        let mut buffer = Vec::new();
        write_branches(&mut buffer, &dataset).expect("write should succeed");
        let branches = read_branches(buffer.as_slice()).expect("read should succeed");
        assert_eq!(branches, dataset.branches);
    }

    #[test]
    fn round_trip_is_exact_for_arbitrary_floats() {
        // Display on f64 emits the shortest representation that parses
        // back to the identical bits, so the round trip is lossless.
        let dataset = BifurcationDataset {
            boundaries: vec![],
            branches: vec![Branch {
                forcings: vec![-29.99, std::f64::consts::PI, 1e-12],
                roots: vec![231.23456789012345, 273.15, 369.9999999999999],
            }],
        };
        let mut buffer = Vec::new();
        write_branches(&mut buffer, &dataset).expect("write should succeed");
        let branches = read_branches(buffer.as_slice()).expect("read should succeed");
        assert_eq!(branches, dataset.branches);
    }

    #[test]
    fn read_rejects_malformed_input() {
        assert!(read_branches("".as_bytes()).is_err());
        assert!(read_branches("not-a-number\n".as_bytes()).is_err());
        assert!(read_branches("1\n0.5;1.5\n\n".as_bytes()).is_err());
        // Truncated stream: promised one group, no terminator.
        assert!(read_branches("1\n0.5,1.5\n".as_bytes()).is_err());
    }
}
