use std::io::Cursor;

use quickfit_harness::session::run_session;

fn run(input: &str, sizes: Option<Vec<usize>>) -> String {
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    run_session(&mut reader, &mut output, sizes).expect("session I/O");
    String::from_utf8(output).expect("utf8 transcript")
}

#[test]
fn worked_example_transcript() {
    // Sizes [4, 8]: allocate 4 twice, free 0, check 0, free 5, exit.
    let input = "4 8\n1\n4\n1\n4\n2\n0\n3\n0\n2\n5\n4\n";
    let transcript = run(input, None);

    let expected_lines = [
        "Enter block sizes separated by spaces:",
        "Allocated block of size 4 at address 0.",
        "Allocated block of size 4 at new address 2.",
        "Freed block of size 4 at address 0.",
        "Block at address 0 is free.",
        "Invalid address 5 for free operation.",
        "Exiting program.",
    ];
    let mut rest = transcript.as_str();
    for line in expected_lines {
        let at = rest
            .find(line)
            .unwrap_or_else(|| panic!("missing line {line:?} in transcript:\n{transcript}"));
        rest = &rest[at + line.len()..];
    }
}

#[test]
fn sizes_from_caller_skip_the_prompt() {
    let transcript = run("4\n", Some(vec![4, 8]));
    assert!(!transcript.contains("Enter block sizes"));
    assert!(transcript.contains("Exiting program."));
}

#[test]
fn unrecycled_free_is_reported_distinctly() {
    // Size 99 has no class: allocation grows, the free cannot recycle.
    let input = "1\n99\n2\n1\n4\n";
    let transcript = run(input, Some(vec![4]));
    assert!(transcript.contains("Allocated block of size 99 at new address 1."));
    assert!(transcript.contains(
        "Freed block of size 99 at address 1, but no suitable quick fit free list."
    ));
}

#[test]
fn malformed_input_is_absorbed_by_the_shell() {
    let input = "not numbers\n4 8\nbogus\n1\nx\n5\n2\ny\n4\n";
    let transcript = run(input, None);
    assert!(transcript.contains("Invalid input. Please enter positive numbers."));
    assert!(transcript.contains("Invalid input. Please enter a number."));
    assert!(transcript.contains("Invalid size input."));
    assert!(transcript.contains("Invalid option. Please choose a valid menu item."));
    assert!(transcript.contains("Invalid address input."));
    assert!(transcript.contains("Exiting program."));
}

#[test]
fn session_ends_cleanly_on_eof() {
    let transcript = run("1\n4\n", Some(vec![4]));
    assert!(transcript.contains("Allocated block of size 4 at address 0."));
    assert!(!transcript.contains("Exiting program."));
}
