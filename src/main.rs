use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};
use std::time::{Duration, Instant};

use connect4_agents::board::{Board, Cell};
use connect4_agents::game::{Role, Utility};
use connect4_agents::montecarlo::MonteCarlo;

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // choose AI control of both players
    let mut ai_players = (false, false);
    for (label, flag) in [("1", &mut ai_players.0), ("2", &mut ai_players.1)] {
        loop {
            let mut buffer = String::new();
            print!("Is player {} AI controlled? y/n: ", label);
            stdout().flush().expect("failed to flush to stdout!");
            stdin.read_line(&mut buffer)?;
            match buffer.to_lowercase().chars().next() {
                Some('y') => {
                    *flag = true;
                    break;
                }
                Some('n') => break,
                _ => println!("Unknown answer given"),
            }
        }
    }

    let mut board = Board::standard();
    let mut role = Role::Maximizer;
    let mut moves_played = 0;

    // game loop
    let outcome = loop {
        draw_board(&board)?;

        if let Some(outcome) = board.utility() {
            break outcome;
        }

        let ai_turn = match role {
            Role::Maximizer => ai_players.0,
            Role::Minimizer => ai_players.1,
        };

        let next_move = if ai_turn {
            println!("AI is thinking...");
            stdout().flush().expect("failed to flush to stdout!");

            // slow down play if both players are AI
            if ai_players == (true, true) {
                std::thread::sleep(Duration::from_secs(1));
            }

            let selector = MonteCarlo::new(role);
            let start = Instant::now();
            let chosen = selector.choose_move_verbose(&board)?;
            println!(
                "{} played column {} after {:.2} seconds",
                role_label(role),
                chosen.column + 1,
                start.elapsed().as_secs_f64()
            );
            chosen

        // human player
        } else {
            print!("Move input (column) > ");
            stdout().flush().expect("failed to flush to stdout!");
            let mut input_str = String::new();
            stdin.read_line(&mut input_str)?;

            let column = match input_str.trim().parse::<usize>() {
                Err(_) => {
                    println!("Invalid number: {}", input_str.trim());
                    continue;
                }
                Ok(column) => column,
            };
            // only a column with an open drop slot resolves to a move
            match board.moves().into_iter().find(|mv| mv.column + 1 == column) {
                Some(mv) => mv,
                None => {
                    println!("Invalid move, column {} full or out of range", column);
                    continue;
                }
            }
        };

        match board.child(next_move, role) {
            Ok(next) => board = next,
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
        }
        moves_played += 1;
        role = role.opponent();
    };

    match outcome {
        Utility::MaxWin => println!("Player 1 wins after {} moves!", moves_played),
        Utility::MinWin => println!("Player 2 wins after {} moves!", moves_played),
        Utility::Draw => println!("Draw after {} moves!", moves_played),
    }
    Ok(())
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Maximizer => "MAX",
        Role::Minimizer => "MIN",
    }
}

fn draw_board(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let geometry = board.geometry();

    let header: String = (1..=geometry.width).map(|c| c.to_string()).collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in 0..geometry.height {
        for column in 0..geometry.width {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.cell(row, column) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
