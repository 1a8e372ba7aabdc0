// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redecoration instruction builder.

/// Build the natural-language instruction sent to the synthesis service.
///
/// States the room context (falling back to "a room" when the description is
/// blank), requests the target style, and pins down what must stay (layout
/// and openings) versus what must change (furnishing and surfaces).
pub fn build_instruction(style: &str, room_description: &str) -> String {
    let room = match room_description.trim() {
        "" => "a room",
        described => described,
    };
    format!(
        "This photo shows {room}. Redecorate it in the {style} style. \
         Keep the room's layout, walls, windows, and doorways exactly where \
         they are. Change the furniture, wall color, flooring, and decor to \
         match the style. Return the redecorated photo."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_contains_style_and_description() {
        let instruction = build_instruction("Scandinavian", "a sunny living room");
        assert!(instruction.contains("a sunny living room"));
        assert!(instruction.contains("Scandinavian style"));
    }

    #[test]
    fn blank_description_falls_back_to_generic_room() {
        for description in ["", "   ", "\t\n"] {
            let instruction = build_instruction("Industrial", description);
            assert!(
                instruction.contains("This photo shows a room."),
                "description {description:?} should fall back"
            );
        }
    }

    #[test]
    fn instruction_preserves_structure_and_changes_surfaces() {
        let instruction = build_instruction("Bohemian", "a bedroom");
        assert!(instruction.contains("layout"));
        assert!(instruction.contains("windows"));
        assert!(instruction.contains("furniture"));
        assert!(instruction.contains("flooring"));
    }
}
