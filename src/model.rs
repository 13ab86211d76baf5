/// First header cell of every grade sheet; import tools key students on it.
pub const NET_ID_HEADER: &str = "Net ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub net_id: String,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, net_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            net_id: net_id.into(),
        }
    }
}

/// Assignment names in column order, fixed once grading starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentList(Vec<String>);

impl AssignmentList {
    /// Splits comma separated input and strips the spaces around each name.
    /// Empty input gives a single empty name.
    pub fn parse(input: &str) -> Self {
        Self(
            input
                .split(',')
                .map(|name| name.trim_matches(' ').to_string())
                .collect(),
        )
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_blank(&self) -> bool {
        self.0.iter().any(|name| name.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn header(&self) -> Vec<&str> {
        std::iter::once(NET_ID_HEADER).chain(self.iter()).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AssignmentList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRow {
    pub net_id: String,
    pub grades: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_spaces_around_names() {
        let list = AssignmentList::parse("HW1, HW2,HW3");
        assert_eq!(list.names(), ["HW1", "HW2", "HW3"]);
    }

    #[test]
    fn parse_keeps_inner_spaces() {
        let list = AssignmentList::parse("  Lab 1 ,Quiz 2");
        assert_eq!(list.names(), ["Lab 1", "Quiz 2"]);
    }

    #[test]
    fn empty_input_is_one_blank_name() {
        let list = AssignmentList::parse("");
        assert_eq!(list.len(), 1);
        assert!(list.has_blank());
    }

    #[test]
    fn header_starts_with_net_id() {
        let list: AssignmentList = ["HW1", "HW2"].into_iter().collect();
        assert_eq!(list.header(), ["Net ID", "HW1", "HW2"]);
    }
}
