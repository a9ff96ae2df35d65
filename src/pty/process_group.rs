/// The process group led by a pty child.
///
/// The child is spawned as a session leader, so its pid doubles as the
/// group id. Anything it forks without `setsid` shares the group and the
/// pty slave, which keeps the output stream open after the leader exits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProcessGroup {
    id: libc::pid_t,
}

impl ProcessGroup {
    pub(crate) fn of_leader(pid: u32) -> Option<Self> {
        libc::pid_t::try_from(pid)
            .ok()
            .filter(|id| *id > 1)
            .map(|id| Self { id })
    }

    pub(crate) fn hangup(&self) -> bool {
        self.send(libc::SIGHUP)
    }

    pub(crate) fn kill(&self) -> bool {
        self.send(libc::SIGKILL)
    }

    /// True while any member of the group (zombies included) still exists.
    pub(crate) fn is_alive(&self) -> bool {
        self.send(0)
    }

    fn send(&self, signal: libc::c_int) -> bool {
        // SAFETY: killpg has no memory-safety preconditions.
        unsafe { libc::killpg(self.id, signal) == 0 }
    }
}
