/// Sink for stage announcements from the generator.
///
/// The pipeline announces each stage (`augment`, `indexes`, `first`,
/// `follow`, `states`, `table`) before running it. The core never writes to
/// an output stream itself; callers that want the classic stderr trace
/// install their own reporter.
pub trait Progress {
    fn stage(&mut self, name: &str);
}

/// Default sink that swallows all announcements.
pub struct Silent;

impl Progress for Silent {
    fn stage(&mut self, _name: &str) {}
}

/// Adapter turning any closure into a [`Progress`] sink.
pub struct Callback<F>(pub F);

impl<F: FnMut(&str)> Progress for Callback<F> {
    fn stage(&mut self, name: &str) {
        (self.0)(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closures_collect_stage_names() {
        let mut seen: Vec<String> = Vec::new();
        {
            let mut sink = Callback(|name: &str| seen.push(name.to_owned()));
            let progress: &mut dyn Progress = &mut sink;
            progress.stage("first");
            progress.stage("follow");
        }
        assert_eq!(seen, vec!["first", "follow"]);
    }
}
