use std::collections::BTreeMap;

use crate::models::{Course, CourseStanding, StatisticsSummary};
use crate::store::Platform;

#[derive(Debug, Default, Clone, Copy)]
struct CourseMetrics {
    enrollment: usize,
    submissions: u64,
    // Wider than the per-student totals so cross-student sums cannot wrap.
    total_points: u64,
}

impl CourseMetrics {
    fn average_score(self) -> f64 {
        if self.submissions == 0 {
            0.0
        } else {
            self.total_points as f64 / self.submissions as f64
        }
    }
}

/// Ranks the six overview labels. Each metric family is ranked
/// independently: "most" is the courses at the maximum value, "least"
/// the courses at the minimum value not already in "most", both
/// restricted to courses with a positive value. The minimum is taken
/// over all courses, so "least" is n/a whenever any course sits at zero
/// or every active course ties with "most".
pub fn overview(platform: &Platform) -> StatisticsSummary {
    let metrics = collect_metrics(platform);
    let per_course = |f: &dyn Fn(CourseMetrics) -> f64| -> Vec<(Course, f64)> {
        Course::ALL
            .into_iter()
            .map(|course| (course, f(metrics.get(&course).copied().unwrap_or_default())))
            .collect()
    };

    let (most_popular, least_popular) = rank_metric(&per_course(&|m| m.enrollment as f64));
    let (highest_activity, lowest_activity) =
        rank_metric(&per_course(&|m| m.submissions as f64));
    let (easiest_course, hardest_course) = rank_metric(&per_course(&|m| m.average_score()));

    StatisticsSummary {
        most_popular,
        least_popular,
        highest_activity,
        lowest_activity,
        easiest_course,
        hardest_course,
    }
}

/// Standings for one course: every student with positive points, sorted by
/// descending points and then ascending id. The completion percentage is
/// rounded to one decimal place.
pub fn course_details(platform: &Platform, course: Course) -> Vec<CourseStanding> {
    let max_points = course.max_points();
    let mut standings: Vec<CourseStanding> = platform
        .students()
        .filter_map(|(id, student)| {
            let points = student.tally(course).points;
            if points == 0 {
                return None;
            }
            let pct = f64::from(points) / f64::from(max_points) * 100.0;
            Some(CourseStanding {
                student_id: id,
                points,
                completed_pct: (pct * 10.0).round() / 10.0,
            })
        })
        .collect();

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(a.student_id.cmp(&b.student_id))
    });
    standings
}

fn collect_metrics(platform: &Platform) -> BTreeMap<Course, CourseMetrics> {
    let mut metrics: BTreeMap<Course, CourseMetrics> = BTreeMap::new();
    for (_, student) in platform.students() {
        for course in Course::ALL {
            let tally = student.tally(course);
            let entry = metrics.entry(course).or_default();
            if tally.points > 0 {
                entry.enrollment += 1;
            }
            entry.submissions += u64::from(tally.submissions);
            entry.total_points += u64::from(tally.points);
        }
    }
    metrics
}

fn rank_metric(values: &[(Course, f64)]) -> (Vec<&'static str>, Vec<&'static str>) {
    let max = values
        .iter()
        .map(|&(_, value)| value)
        .fold(f64::NEG_INFINITY, f64::max);
    // The minimum ranges over all courses, so any idle course pins it to
    // zero and the "least" label collapses to n/a.
    let min = values
        .iter()
        .map(|&(_, value)| value)
        .fold(f64::INFINITY, f64::min);

    let most: Vec<&'static str> = values
        .iter()
        .filter(|&&(_, value)| value == max && value > 0.0)
        .map(|&(course, _)| course.title())
        .collect();
    let least: Vec<&'static str> = values
        .iter()
        .filter(|&&(_, value)| value == min && value > 0.0 && value != max)
        .map(|&(course, _)| course.title())
        .collect();

    let most = if most.is_empty() { vec!["n/a"] } else { most };
    let least = if least.is_empty() { vec!["n/a"] } else { least };
    (most, least)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(platform: &mut Platform, first: &str, last: &str, email: &str) -> String {
        platform.add_student(first, last, email).unwrap().to_string()
    }

    #[test]
    fn empty_store_reports_na_everywhere() {
        let platform = Platform::new();
        let summary = overview(&platform);
        assert_eq!(summary.most_popular, vec!["n/a"]);
        assert_eq!(summary.least_popular, vec!["n/a"]);
        assert_eq!(summary.highest_activity, vec!["n/a"]);
        assert_eq!(summary.lowest_activity, vec!["n/a"]);
        assert_eq!(summary.easiest_course, vec!["n/a"]);
        assert_eq!(summary.hardest_course, vec!["n/a"]);
    }

    #[test]
    fn registered_but_inactive_students_report_na() {
        let mut platform = Platform::new();
        add(&mut platform, "John", "Doe", "jdoe@mail.net");
        let summary = overview(&platform);
        assert_eq!(summary.most_popular, vec!["n/a"]);
        assert_eq!(summary.lowest_activity, vec!["n/a"]);
    }

    #[test]
    fn all_courses_tied_leaves_least_empty() {
        let mut platform = Platform::new();
        let id = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        platform.add_points(&id, &["10", "10", "10", "10"]).unwrap();

        let summary = overview(&platform);
        assert_eq!(
            summary.most_popular,
            vec!["Python", "DSA", "Databases", "Flask"]
        );
        assert_eq!(summary.least_popular, vec!["n/a"]);
        assert_eq!(summary.lowest_activity, vec!["n/a"]);
        assert_eq!(summary.hardest_course, vec!["n/a"]);
    }

    #[test]
    fn metric_families_rank_independently() {
        let mut platform = Platform::new();
        let a = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        let b = add(&mut platform, "Jane", "Spark", "jspark@mail.net");
        platform.add_points(&a, &["10", "20", "30", "40"]).unwrap();
        platform.add_points(&b, &["10", "0", "0", "0"]).unwrap();

        let summary = overview(&platform);
        // Enrollment and submissions: Python 2, every other course 1.
        assert_eq!(summary.most_popular, vec!["Python"]);
        assert_eq!(summary.least_popular, vec!["DSA", "Databases", "Flask"]);
        assert_eq!(summary.highest_activity, vec!["Python"]);
        assert_eq!(summary.lowest_activity, vec!["DSA", "Databases", "Flask"]);
        // Average score: Python 10.0, DSA 20.0, Databases 30.0, Flask 40.0.
        assert_eq!(summary.easiest_course, vec!["Flask"]);
        assert_eq!(summary.hardest_course, vec!["Python"]);
    }

    #[test]
    fn idle_course_pins_least_to_na() {
        let mut platform = Platform::new();
        let a = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        let b = add(&mut platform, "Jane", "Spark", "jspark@mail.net");
        platform.add_points(&a, &["4", "30", "0", "0"]).unwrap();
        platform.add_points(&a, &["4", "0", "0", "0"]).unwrap();
        platform.add_points(&b, &["4", "0", "0", "0"]).unwrap();

        // Databases and Flask are idle, so the minimum of every metric
        // family is zero and no course qualifies as "least".
        let summary = overview(&platform);
        assert_eq!(summary.most_popular, vec!["Python"]);
        assert_eq!(summary.least_popular, vec!["n/a"]);
        assert_eq!(summary.highest_activity, vec!["Python"]);
        assert_eq!(summary.lowest_activity, vec!["n/a"]);
        assert_eq!(summary.easiest_course, vec!["DSA"]);
        assert_eq!(summary.hardest_course, vec!["n/a"]);
    }

    #[test]
    fn courses_at_zero_never_rank() {
        let mut platform = Platform::new();
        let id = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        platform.add_points(&id, &["5", "8", "0", "0"]).unwrap();

        let summary = overview(&platform);
        assert_eq!(summary.most_popular, vec!["Python", "DSA"]);
        assert_eq!(summary.least_popular, vec!["n/a"]);
        assert_eq!(summary.easiest_course, vec!["DSA"]);
        assert_eq!(summary.hardest_course, vec!["n/a"]);
    }

    #[test]
    fn overview_sums_huge_totals_without_wrapping() {
        let mut platform = Platform::new();
        let a = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        let b = add(&mut platform, "Jane", "Spark", "jspark@mail.net");
        for id in [&a, &b] {
            platform
                .add_points(id, &["4000000000", "0", "0", "0"])
                .unwrap();
            platform
                .add_points(id, &["4000000000", "0", "0", "0"])
                .unwrap();
        }

        // Both students sit at the u32 ceiling; the cross-student sum
        // only fits in the wider accumulator.
        let summary = overview(&platform);
        assert_eq!(summary.most_popular, vec!["Python"]);
        assert_eq!(summary.easiest_course, vec!["Python"]);
        assert_eq!(summary.hardest_course, vec!["n/a"]);
    }

    #[test]
    fn details_sort_by_points_then_id() {
        let mut platform = Platform::new();
        let a = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        let b = add(&mut platform, "Jane", "Spark", "jspark@mail.net");
        let c = add(&mut platform, "Anne-Marie", "O'Brien", "amob@mail.net");
        platform.add_points(&a, &["300", "0", "0", "0"]).unwrap();
        platform.add_points(&b, &["480", "0", "0", "0"]).unwrap();
        platform.add_points(&c, &["300", "0", "0", "0"]).unwrap();

        let details = course_details(&platform, Course::Python);
        let order: Vec<u32> = details.iter().map(|row| row.student_id).collect();
        assert_eq!(order, vec![10001, 10000, 10002]);
        assert_eq!(details[0].completed_pct, 80.0);
        assert_eq!(details[1].completed_pct, 50.0);
    }

    #[test]
    fn details_skip_students_without_points() {
        let mut platform = Platform::new();
        let a = add(&mut platform, "John", "Doe", "jdoe@mail.net");
        add(&mut platform, "Jane", "Spark", "jspark@mail.net");
        platform.add_points(&a, &["0", "100", "0", "0"]).unwrap();

        assert!(course_details(&platform, Course::Python).is_empty());
        let dsa = course_details(&platform, Course::Dsa);
        assert_eq!(dsa.len(), 1);
        assert_eq!(dsa[0].points, 100);
        assert_eq!(dsa[0].completed_pct, 25.0);
    }
}
