//! Canonical rewriting of an expression line.
//!
//! Whitespace is dropped and runs of sign characters are folded so that the
//! evaluator sees at most one sign between operands.

/// Rewrite a validated line into the stream consumed by the evaluator.
pub fn normalize(line: &str) -> String {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let folded = fold_groups(&compact, '-', 3, '-');
    let folded = fold_groups(&folded, '-', 2, '+');
    let collapsed = collapse_runs(&folded, '+');
    collapsed.replace("+-", "-")
}

/// Replace every complete group of `size` consecutive `target` characters with
/// `replacement`, scanning left to right without revisiting the output.
///
/// A run that is not a multiple of `size` keeps its remainder as is, so
/// `-----` folded by three becomes `---`.
fn fold_groups(input: &str, target: char, size: usize, replacement: char) -> String {
    let mut output = String::with_capacity(input.len());
    let mut run = 0;

    for c in input.chars() {
        if c == target {
            run += 1;
        } else {
            push_run(&mut output, run, target, size, replacement);
            run = 0;
            output.push(c);
        }
    }
    push_run(&mut output, run, target, size, replacement);

    output
}

fn push_run(output: &mut String, run: usize, target: char, size: usize, replacement: char) {
    output.extend(std::iter::repeat_n(replacement, run / size));
    output.extend(std::iter::repeat_n(target, run % size));
}

fn collapse_runs(input: &str, target: char) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        if c == target && output.ends_with(target) {
            continue;
        }
        output.push(c);
    }
    output
}
