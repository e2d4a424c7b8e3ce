// ============================================================================
// Renderer
// Turns a rounded measurement into text for one output dialect
// ============================================================================

use crate::domain::{ErrorShape, FormatOptions};
use crate::engine::reconciler::RoundedMeasurement;
use crate::engine::symbols::SymbolTable;

/// Render a rounded measurement.
///
/// `labels` are attached after each symmetric uncertainty and after the
/// second half of each asymmetric pair. With one label per input uncertainty
/// and some asymmetric input, a group takes the label at the input position
/// of its first member, so symmetrized pairs keep later labels aligned.
/// Otherwise labels are used one per group.
pub fn render(rounded: &RoundedMeasurement, labels: &[String], options: &FormatOptions) -> String {
    let symbols = SymbolTable::for_options(options);
    let factorized = options.factorize_powers;
    let math = options.mode.is_math();
    let power = rounded.central.value.exponent();
    let wrap_power = factorized && power != 0;

    let mut out = String::with_capacity(128);
    if wrap_power {
        out.push_str(symbols.paren_open);
    }
    rounded.central.write_decimal(&mut out, factorized);

    let by_first_member = labels.len() == rounded.input_len && rounded.had_asymmetric_input();

    // Counts halves: a symmetric entry closes a group by itself
    let mut halves = 0usize;
    let mut group_start = 0usize;
    for (i, uncertainty) in rounded.uncertainties.iter().enumerate() {
        out.push(' ');
        if halves % 2 == 0 {
            group_start = i;
        }

        let wrapped = math && uncertainty.shape.is_asymmetric();
        if wrapped {
            if halves % 2 == 0 {
                out.push_str(symbols.pair_space);
            }
            out.push(if uncertainty.shape == ErrorShape::Upper {
                '^'
            } else {
                '_'
            });
            out.push_str(symbols.group_open);
        }

        match uncertainty.shape {
            ErrorShape::Symmetric => {
                out.push_str(symbols.plus_minus);
                out.push(' ');
                halves += 1;
            }
            ErrorShape::Upper => out.push('+'),
            ErrorShape::Lower => {}
        }
        uncertainty.write_decimal(&mut out, factorized);

        if wrapped {
            out.push_str(symbols.group_close);
        }
        halves += 1;

        if halves % 2 == 0 {
            let index = if by_first_member {
                rounded.origins.get(group_start).copied().unwrap_or(group_start)
            } else {
                halves / 2 - 1
            };
            if let Some(label) = labels.get(index) {
                out.push(' ');
                out.push_str(symbols.text_open);
                out.push_str(label);
                out.push_str(symbols.text_close);
            }
        }
    }

    if wrap_power {
        out.push_str(symbols.paren_close);
        out.push_str(symbols.multiplication(options.use_alternate_multiplication_symbol));
        out.push_str("10");
        if power != 1 {
            out.push('^');
            out.push_str(symbols.group_open);
            out.push_str(&power.to_string());
            out.push_str(symbols.group_close);
        }
    }

    out
}
