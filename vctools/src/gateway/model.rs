use crate::error::gateway::ProcessResult;

pub(super) trait Process {
    async fn process(self) -> ProcessResult;
}
