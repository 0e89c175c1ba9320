use std::collections::BTreeMap;
use std::fmt;

/// The fixed course catalog. Variant order is the catalog order used for
/// every listing and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Course {
    Python,
    Dsa,
    Databases,
    Flask,
}

impl Course {
    pub const ALL: [Course; 4] = [
        Course::Python,
        Course::Dsa,
        Course::Databases,
        Course::Flask,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Course::Python => "Python",
            Course::Dsa => "DSA",
            Course::Databases => "Databases",
            Course::Flask => "Flask",
        }
    }

    /// Points needed to complete the course.
    pub fn max_points(self) -> u32 {
        match self {
            Course::Python => 600,
            Course::Dsa => 400,
            Course::Databases => 480,
            Course::Flask => 550,
        }
    }

    /// Case-insensitive lookup against the catalog.
    pub fn from_input(input: &str) -> Option<Course> {
        let wanted = input.trim().to_lowercase();
        Course::ALL
            .into_iter()
            .find(|course| course.title().to_lowercase() == wanted)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Running totals for one student in one course. `submissions` counts
/// point-earning submissions, at most one per `add_points` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseTally {
    pub points: u32,
    pub submissions: u32,
}

#[derive(Debug, Clone)]
pub struct Student {
    pub full_name: String,
    pub email: String,
    pub tallies: BTreeMap<Course, CourseTally>,
}

impl Student {
    pub fn new(full_name: String, email: String) -> Self {
        let tallies = Course::ALL
            .into_iter()
            .map(|course| (course, CourseTally::default()))
            .collect();
        Self {
            full_name,
            email,
            tallies,
        }
    }

    pub fn tally(&self, course: Course) -> CourseTally {
        self.tallies.get(&course).copied().unwrap_or_default()
    }
}

/// One course-completion message, ready to be rendered by the REPL.
#[derive(Debug, Clone)]
pub struct Notification {
    pub email: String,
    pub full_name: String,
    pub course: Course,
}

/// One row of a per-course standings table.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStanding {
    pub student_id: u32,
    pub points: u32,
    pub completed_pct: f64,
}

/// The six ranked labels of the statistics overview. Each entry is a list
/// of course titles, or the single placeholder "n/a".
#[derive(Debug, Clone)]
pub struct StatisticsSummary {
    pub most_popular: Vec<&'static str>,
    pub least_popular: Vec<&'static str>,
    pub highest_activity: Vec<&'static str>,
    pub lowest_activity: Vec<&'static str>,
    pub easiest_course: Vec<&'static str>,
    pub hardest_course: Vec<&'static str>,
}
