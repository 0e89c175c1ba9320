use std::io::BufRead;

use crate::error::PlatformError;
use crate::models::Course;
use crate::stats;
use crate::store::Platform;

/// Runs the interactive session until `exit` or end of input. Every error
/// is printed and control returns to the loop that produced it.
pub fn run(platform: &mut Platform, input: &mut impl BufRead) -> anyhow::Result<()> {
    loop {
        let Some(line) = read_line(input)? else {
            break;
        };
        match line.to_lowercase().as_str() {
            "exit" => {
                println!("Bye!");
                break;
            }
            "add students" => add_students_loop(platform, input)?,
            "list" => list_students(platform),
            "add points" => add_points_loop(platform, input)?,
            "find" => find_loop(platform, input)?,
            "statistics" => statistics_loop(platform, input)?,
            "notify" => notify(platform),
            "back" => println!("Enter 'exit' to exit the program"),
            "" => println!("No input."),
            _ => println!("Unknown command!"),
        }
    }
    Ok(())
}

/// One trimmed line, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> anyhow::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn add_students_loop(platform: &mut Platform, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("Enter student credentials or 'back' to return:");
    let mut added = 0usize;
    while let Some(line) = read_line(input)? {
        if line == "back" {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            println!("Incorrect credentials.");
            continue;
        }
        // First token is the first name, last token the email, everything
        // in between is the last name.
        let first_name = tokens[0];
        let email = tokens[tokens.len() - 1];
        let last_name = tokens[1..tokens.len() - 1].join(" ");
        match platform.add_student(first_name, &last_name, email) {
            Ok(_) => {
                println!("The student has been added.");
                added += 1;
            }
            Err(err) => println!("{err}"),
        }
    }
    println!("Total {added} students have been added.");
    Ok(())
}

fn list_students(platform: &Platform) {
    if platform.is_empty() {
        println!("No students found.");
        return;
    }
    println!("Students:");
    for id in platform.student_ids() {
        println!("{id}");
    }
}

fn add_points_loop(platform: &mut Platform, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("Enter an id and points or 'back' to return:");
    while let Some(line) = read_line(input)? {
        if line == "back" {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let result = match tokens.split_first() {
            Some((id_token, point_tokens)) => platform.add_points(id_token, point_tokens),
            None => Err(PlatformError::InvalidPoints),
        };
        match result {
            Ok(()) => println!("Points updated."),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn find_loop(platform: &Platform, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("Enter an id or 'back' to return:");
    while let Some(line) = read_line(input)? {
        if line == "back" {
            break;
        }
        match platform.find_student(&line) {
            Ok((id, student)) => {
                let totals: Vec<String> = Course::ALL
                    .into_iter()
                    .map(|course| format!("{}={}", course.title(), student.tally(course).points))
                    .collect();
                println!("{id} points: {}", totals.join("; "));
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn statistics_loop(platform: &Platform, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("Type the name of a course to see details or 'back' to quit:");
    let summary = stats::overview(platform);
    println!("Most popular: {}", summary.most_popular.join(", "));
    println!("Least popular: {}", summary.least_popular.join(", "));
    println!("Highest activity: {}", summary.highest_activity.join(", "));
    println!("Lowest activity: {}", summary.lowest_activity.join(", "));
    println!("Easiest course: {}", summary.easiest_course.join(", "));
    println!("Hardest course: {}", summary.hardest_course.join(", "));

    while let Some(line) = read_line(input)? {
        if line.eq_ignore_ascii_case("back") {
            break;
        }
        match Course::from_input(&line) {
            Some(course) => {
                println!("{course}");
                println!("id    points    completed");
                for row in stats::course_details(platform, course) {
                    println!(
                        "{} {:<10} {:.1}%",
                        row.student_id, row.points, row.completed_pct
                    );
                }
            }
            None => println!("{}", PlatformError::UnknownCourse),
        }
    }
    Ok(())
}

fn notify(platform: &mut Platform) {
    let (messages, notified_students) = platform.notify();
    for message in &messages {
        println!("To: {}", message.email);
        println!("Re: Your Learning Progress");
        println!(
            "Hello, {}! You have accomplished our {} course!",
            message.full_name, message.course
        );
    }
    println!("Total {notified_students} students have been notified.");
}
