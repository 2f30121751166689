//! Interactive request/response shell.
//!
//! Strictly one command per iteration: read a menu choice, perform one
//! allocator call, print one status line. All parsing happens here; the
//! core never sees malformed input.

use std::io::{self, BufRead, Write};

use quickfit_core::{AllocOutcome, FreeError, FreeOutcome, QuickFitAllocator};

/// Status line for an allocation outcome.
///
/// Growth allocations say "new address" so the operator can tell reuse
/// and growth apart.
pub fn alloc_status(outcome: AllocOutcome) -> String {
    match outcome {
        AllocOutcome::Reused { address, size } => {
            format!("Allocated block of size {size} at address {address}.")
        }
        AllocOutcome::Grown { address, size } => {
            format!("Allocated block of size {size} at new address {address}.")
        }
    }
}

/// Status line for a free result, including the failure case.
pub fn free_status(result: Result<FreeOutcome, FreeError>) -> String {
    match result {
        Ok(FreeOutcome::Recycled { address, size }) => {
            format!("Freed block of size {size} at address {address}.")
        }
        Ok(FreeOutcome::Unrecycled { address, size }) => {
            format!("Freed block of size {size} at address {address}, but no suitable quick fit free list.")
        }
        Err(FreeError::InvalidAddress { address }) => {
            format!("Invalid address {address} for free operation.")
        }
    }
}

/// Status line for a free-check query.
pub fn check_status(address: usize, free: bool) -> String {
    if free {
        format!("Block at address {address} is free.")
    } else {
        format!("Block at address {address} is not free.")
    }
}

/// Runs the menu loop until the operator exits or input runs dry.
///
/// When `sizes` is `Some` (for example from the command line) the
/// initial size-class prompt is skipped.
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    sizes: Option<Vec<usize>>,
) -> io::Result<()> {
    let sizes = match sizes {
        Some(sizes) => sizes,
        None => loop {
            writeln!(output, "Enter block sizes separated by spaces:")?;
            output.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(());
            };
            match parse_sizes(&line) {
                Some(sizes) if !sizes.is_empty() => break sizes,
                _ => writeln!(output, "Invalid input. Please enter positive numbers.")?,
            }
        },
    };

    let mut allocator = QuickFitAllocator::new(&sizes);

    loop {
        writeln!(output)?;
        writeln!(output, "Menu:")?;
        writeln!(output, "1. Allocate Memory")?;
        writeln!(output, "2. Free Memory")?;
        writeln!(output, "3. Check if Block is Free")?;
        writeln!(output, "4. Exit")?;
        write!(output, "Choose an option: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        let Ok(choice) = line.trim().parse::<u32>() else {
            writeln!(output, "Invalid input. Please enter a number.")?;
            continue;
        };

        match choice {
            1 => {
                write!(output, "Enter size to allocate: ")?;
                output.flush()?;
                let Some(line) = read_line(input)? else {
                    return Ok(());
                };
                match line.trim().parse::<usize>() {
                    Ok(size) if size > 0 => {
                        writeln!(output, "{}", alloc_status(allocator.allocate(size)))?;
                    }
                    _ => writeln!(output, "Invalid size input.")?,
                }
            }
            2 => {
                write!(output, "Enter address to free: ")?;
                output.flush()?;
                let Some(line) = read_line(input)? else {
                    return Ok(());
                };
                match line.trim().parse::<usize>() {
                    Ok(address) => {
                        writeln!(output, "{}", free_status(allocator.free(address)))?;
                    }
                    Err(_) => writeln!(output, "Invalid address input.")?,
                }
            }
            3 => {
                write!(output, "Enter address to check: ")?;
                output.flush()?;
                let Some(line) = read_line(input)? else {
                    return Ok(());
                };
                match line.trim().parse::<usize>() {
                    Ok(address) => {
                        let free = allocator.is_block_free(address);
                        writeln!(output, "{}", check_status(address, free))?;
                    }
                    Err(_) => writeln!(output, "Invalid address input.")?,
                }
            }
            4 => {
                writeln!(output, "Exiting program.")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid option. Please choose a valid menu item.")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Parses whitespace-separated positive integers; `None` on any bad token.
fn parse_sizes(line: &str) -> Option<Vec<usize>> {
    line.split_whitespace()
        .map(|token| match token.parse::<usize>() {
            Ok(size) if size > 0 => Some(size),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_status_distinguishes_reuse_and_growth() {
        assert_eq!(
            alloc_status(AllocOutcome::Reused {
                address: 0,
                size: 4
            }),
            "Allocated block of size 4 at address 0."
        );
        assert_eq!(
            alloc_status(AllocOutcome::Grown {
                address: 2,
                size: 4
            }),
            "Allocated block of size 4 at new address 2."
        );
    }

    #[test]
    fn test_free_status_three_way() {
        assert_eq!(
            free_status(Ok(FreeOutcome::Recycled {
                address: 1,
                size: 8
            })),
            "Freed block of size 8 at address 1."
        );
        assert_eq!(
            free_status(Ok(FreeOutcome::Unrecycled {
                address: 3,
                size: 99
            })),
            "Freed block of size 99 at address 3, but no suitable quick fit free list."
        );
        assert_eq!(
            free_status(Err(FreeError::InvalidAddress { address: 5 })),
            "Invalid address 5 for free operation."
        );
    }

    #[test]
    fn test_check_status() {
        assert_eq!(check_status(0, true), "Block at address 0 is free.");
        assert_eq!(check_status(9, false), "Block at address 9 is not free.");
    }

    #[test]
    fn test_parse_sizes() {
        assert_eq!(parse_sizes("4 8  16"), Some(vec![4, 8, 16]));
        assert_eq!(parse_sizes("4 x 8"), None);
        assert_eq!(parse_sizes("4 0"), None);
        assert_eq!(parse_sizes(""), Some(vec![]));
    }
}
