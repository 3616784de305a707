//! Messaging services
//!
//! Rooms, messages, people, teams, room and team memberships, and webhooks.
//! Each service is a thin, cloneable handle over the shared
//! [`RestSession`](crate::rest::RestSession).

mod memberships;
mod messages;
mod people;
mod rooms;
mod teams;
mod webhooks;

pub use memberships::{
    Membership, MembershipCreateRequest, MembershipListOptions, MembershipUpdateRequest,
    MembershipsService, TeamMembership, TeamMembershipCreateRequest, TeamMembershipUpdateRequest,
    TeamMembershipsService,
};
pub use messages::{
    Attachment, Message, MessageCreateRequest, MessageDirectListOptions, MessageListOptions,
    MessageUpdateRequest, MessagesService,
};
pub use people::{Address, PeopleListOptions, PeopleService, Person, PersonRequest, PhoneNumber, SipAddress};
pub use rooms::{Room, RoomListOptions, RoomMeetingInfo, RoomRequest, RoomsService};
pub use teams::{Team, TeamRequest, TeamsService};
pub use webhooks::{Webhook, WebhookCreateRequest, WebhookUpdateRequest, WebhooksService};
