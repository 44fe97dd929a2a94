use skapi::{Page, Record};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::activity::ActivityData;
use crate::app::{DeleteContext, FetchTicket};

#[derive(Debug)]
pub(super) enum Action {
    CheckSession,
    SubmitLogin,
    Logout,
    SubmitActivity,
    /// A background activity write finished.
    SubmitFinished {
        data: ActivityData,
        result: skapi::Result<Record>,
    },
    RefreshList,
    LoadMore,
    /// A background fetch finished.
    ApplyPage {
        ticket: FetchTicket,
        result: skapi::Result<Page<Record>>,
    },
    ConfirmDelete,
    /// A background delete finished.
    DeleteFinished {
        ctx: DeleteContext,
        result: skapi::Result<()>,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
