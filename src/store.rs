use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::error::PlatformError;
use crate::models::{Course, Notification, Student};
use crate::validate;

const FIRST_STUDENT_ID: u32 = 10000;

/// The single mutable state instance for the whole process: student
/// records, the email uniqueness set, the id counter, and the ledger of
/// completion notifications already sent.
pub struct Platform {
    students: BTreeMap<u32, Student>,
    emails: HashSet<String>,
    next_id: u32,
    notified: HashSet<(u32, Course)>,
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform {
    pub fn new() -> Self {
        Self {
            students: BTreeMap::new(),
            emails: HashSet::new(),
            next_id: FIRST_STUDENT_ID,
            notified: HashSet::new(),
        }
    }

    /// Validates first name, last name, then email, short-circuiting on
    /// the first failure; rejects duplicate emails. On success allocates
    /// the next sequential id and stores a zeroed record. Nothing is
    /// mutated on any failure path.
    pub fn add_student(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<u32, PlatformError> {
        if !validate::is_valid_name(first_name) {
            return Err(PlatformError::InvalidFirstName);
        }
        if !validate::is_valid_name(last_name) {
            return Err(PlatformError::InvalidLastName);
        }
        if !validate::is_valid_email(email) {
            return Err(PlatformError::InvalidEmail);
        }
        if self.emails.contains(email) {
            return Err(PlatformError::DuplicateEmail);
        }

        let id = self.next_id;
        self.next_id += 1;
        let full_name = format!("{first_name} {last_name}");
        self.students
            .insert(id, Student::new(full_name, email.to_string()));
        self.emails.insert(email.to_string());
        debug!(id, email, "registered student");
        Ok(id)
    }

    /// All ids in insertion order (ids are allocated monotonically, so
    /// this is also ascending id order).
    pub fn student_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.students.keys().copied()
    }

    pub fn students(&self) -> impl Iterator<Item = (u32, &Student)> {
        self.students.iter().map(|(id, student)| (*id, student))
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn resolve(&self, id_token: &str) -> Result<u32, PlatformError> {
        // Ids match verbatim: "010000" or "+10000" is not a known id even
        // though it parses to one.
        id_token
            .parse::<u32>()
            .ok()
            .filter(|id| id.to_string() == id_token)
            .filter(|id| self.students.contains_key(id))
            .ok_or_else(|| PlatformError::UnknownStudent(id_token.to_string()))
    }

    /// Records one submission. The id is checked before the point format.
    /// Every course with a positive value gains one submission event and
    /// the value is added to its running total; points are never
    /// overwritten. A failed call applies nothing.
    pub fn add_points(
        &mut self,
        id_token: &str,
        point_tokens: &[&str],
    ) -> Result<(), PlatformError> {
        let id = self.resolve(id_token)?;
        let values = parse_points(point_tokens)?;

        let student = self
            .students
            .get_mut(&id)
            .ok_or_else(|| PlatformError::UnknownStudent(id_token.to_string()))?;
        for (course, value) in Course::ALL.into_iter().zip(values) {
            if value > 0 {
                let tally = student.tallies.entry(course).or_default();
                tally.submissions += 1;
                // Totals must never go backwards, even on absurd input.
                tally.points = tally.points.saturating_add(value);
            }
        }
        debug!(id, "points updated");
        Ok(())
    }

    pub fn find_student(&self, id_token: &str) -> Result<(u32, &Student), PlatformError> {
        let id = self.resolve(id_token)?;
        let student = self
            .students
            .get(&id)
            .ok_or_else(|| PlatformError::UnknownStudent(id_token.to_string()))?;
        Ok((id, student))
    }

    /// Emits one notification per (student, course) pair that has reached
    /// the course maximum and has not been notified before, recording each
    /// pair in the ledger. Returns the messages plus the count of distinct
    /// students notified by this call, so a repeat call sends nothing and
    /// reports zero.
    pub fn notify(&mut self) -> (Vec<Notification>, usize) {
        let mut messages = Vec::new();
        let mut notified_students = 0usize;

        for (&id, student) in &self.students {
            let mut sent_any = false;
            for course in Course::ALL {
                if student.tally(course).points < course.max_points() {
                    continue;
                }
                if !self.notified.insert((id, course)) {
                    continue;
                }
                messages.push(Notification {
                    email: student.email.clone(),
                    full_name: student.full_name.clone(),
                    course,
                });
                sent_any = true;
            }
            if sent_any {
                notified_students += 1;
            }
        }

        debug!(
            messages = messages.len(),
            students = notified_students,
            "notification pass finished"
        );
        (messages, notified_students)
    }
}

/// Exactly four tokens, each an unsigned decimal integer literal.
fn parse_points(tokens: &[&str]) -> Result<[u32; 4], PlatformError> {
    if tokens.len() != Course::ALL.len() {
        return Err(PlatformError::InvalidPoints);
    }
    let mut values = [0u32; 4];
    for (slot, token) in values.iter_mut().zip(tokens) {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlatformError::InvalidPoints);
        }
        *slot = token.parse().map_err(|_| PlatformError::InvalidPoints)?;
    }
    Ok(values)
}
