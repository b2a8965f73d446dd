// server/src/cli/handlers_utils.rs

use std::io::{stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, ResetColor, SetForegroundColor},
    terminal::{size, Clear, ClearType},
};

pub fn print_welcome_screen() {
    let (cols, _rows) = size().unwrap_or((100, 40));
    let total_width = cols as usize;
    let border_char = '#';
    let line_str = border_char.to_string().repeat(total_width);

    let title = "ClinicDB Command Line Interface";
    let version = concat!("Version ", env!("CARGO_PKG_VERSION"));
    let welcome_msg = "Welcome! Type 'help' for a list of commands.";
    let intuitive_tip =
        "Tip: Type a command word on its own (e.g. 'add') to be walked through it field by field.";
    let session_tip = "Tip: In a dialogue, '<<' steps back and '/exit' cancels.";
    let exit_tip = "Type 'exit' or 'quit' to leave the CLI.";

    let print_centered = |text: &str, color: Color, out: &mut std::io::Stdout| {
        let content_width = total_width.saturating_sub(2);
        let padding = content_width.saturating_sub(text.len());
        let left = padding / 2;
        let right = padding - left;
        let _ = execute!(out, SetForegroundColor(Color::Cyan));
        print!("{}", border_char);
        let _ = execute!(out, SetForegroundColor(color));
        print!("{}{}{}", " ".repeat(left), text, " ".repeat(right));
        let _ = execute!(out, SetForegroundColor(Color::Cyan));
        println!("{}", border_char);
    };

    let mut out = stdout();
    let _ = execute!(out, SetForegroundColor(Color::Cyan));
    println!("{}", line_str);
    print_centered(title, Color::White, &mut out);
    print_centered(version, Color::DarkGrey, &mut out);
    print_centered("", Color::White, &mut out);
    print_centered(welcome_msg, Color::Green, &mut out);
    print_centered(intuitive_tip, Color::Yellow, &mut out);
    print_centered(session_tip, Color::Yellow, &mut out);
    print_centered(exit_tip, Color::DarkGrey, &mut out);
    println!("{}", line_str);
    let _ = execute!(out, ResetColor);
    let _ = out.flush();
}

pub fn clear_terminal_screen() -> Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
