//! Per-client PDR sessions
//!
//! A session holds the pose, heading estimator and trajectory of one client
//! address. Sessions are created by the first `start`, `locate` or `update`
//! from an address, at the configured initial pose, and released once `end`
//! has written their trajectory.
//!
//! | Channel  | Effect                                                     |
//! |----------|------------------------------------------------------------|
//! | `start`  | reset pose, heading estimator and trajectory               |
//! | `locate` | walk the pose through the uploaded batch                   |
//! | `update` | move halfway towards an external estimate                  |
//! | `end`    | write the trajectory file, then release the session        |

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Local;
use pada::config::{HeadingSection, SignalSection};
use pada::{HeadingEstimator, Localizer, Pose2D, SensorBatch, create_estimator};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::protocol::{Channel, LocateReply, Message, NO_LANDMARK, Reply, UpdateReply};
use crate::trajectory::{Trajectory, TrajectoryRecord};

/// State of one client
pub struct Session {
    pose: Pose2D,
    heading: Box<dyn HeadingEstimator>,
    trajectory: Trajectory,
}

impl Session {
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
}

/// What a fresh session looks like
struct SessionTemplate {
    pose: Pose2D,
    heading: HeadingSection,
    signal: SignalSection,
}

impl SessionTemplate {
    fn create(&self) -> Session {
        Session {
            pose: self.pose,
            heading: create_estimator(&self.heading, &self.signal),
            trajectory: Trajectory::default(),
        }
    }
}

/// Owns every session and the shared localization pipeline
pub struct SessionManager {
    sessions: HashMap<SocketAddr, Session>,
    localizer: Localizer,
    template: SessionTemplate,
    output_dir: PathBuf,
}

impl SessionManager {
    pub fn new(config: &ServerConfig, localizer: Localizer) -> Self {
        Self {
            sessions: HashMap::new(),
            localizer,
            template: SessionTemplate {
                pose: config.initial_pose(),
                heading: config.engine.heading.clone(),
                signal: config.engine.signal.clone(),
            },
            output_dir: PathBuf::from(&config.output.trajectory_dir),
        }
    }

    /// Session of `client`, if it has sent anything yet
    pub fn get(&self, client: &SocketAddr) -> Option<&Session> {
        self.sessions.get(client)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Route a reassembled message to its handler.
    pub fn handle(&mut self, client: SocketAddr, message: &Message) -> Result<Reply> {
        match message.channel {
            Channel::Start => self.start(client, &message.payload),
            Channel::Locate => self.locate(client, &message.payload),
            Channel::Update => self.update(client, &message.payload),
            Channel::End => Ok(self.end(client)),
        }
    }

    /// `x,y,heading` (radians). Resets the session.
    pub fn start(&mut self, client: SocketAddr, payload: &str) -> Result<Reply> {
        let [x, y, heading] = parse_row(payload, "start")?;
        let x = x.parse_f64()?;
        let y = y.parse_f64()?;
        let heading = heading.parse_f64()?;

        let session = self
            .sessions
            .entry(client)
            .or_insert_with(|| self.template.create());
        session.pose = Pose2D::new(x, y, heading);
        session.heading.reset();
        session.trajectory.clear();

        let landmark = self.localizer.floor_plan().landmark_at(x, y).map(str::to_owned);
        session
            .trajectory
            .push(TrajectoryRecord::new(session.pose, landmark, false));

        log::info!(
            "{}: session started at ({:.4}, {:.4}, {:.3} rad)",
            client,
            session.pose.x,
            session.pose.y,
            session.pose.heading
        );
        Ok(Reply::Ack(true))
    }

    /// Sensor CSV. Walks the pose through every detected step.
    pub fn locate(&mut self, client: SocketAddr, payload: &str) -> Result<Reply> {
        let batch = SensorBatch::from_csv(payload)?;

        let session = self
            .sessions
            .entry(client)
            .or_insert_with(|| self.template.create());
        let result = self
            .localizer
            .localize(&batch, &mut session.pose, session.heading.as_mut())?;

        let plan = self.localizer.floor_plan();
        for update in &result.steps {
            let landmark = plan.landmark_at(update.pose.x, update.pose.y).map(str::to_owned);
            session
                .trajectory
                .push(TrajectoryRecord::new(update.pose, landmark, false));
        }

        log::debug!(
            "{}: {} samples, {} steps, now ({:.4}, {:.4}, {:.3} rad)",
            client,
            batch.len(),
            result.steps.len(),
            result.pose.x,
            result.pose.y,
            result.pose.heading
        );

        Ok(Reply::Locate(LocateReply {
            is_stepped: result.is_stepped(),
            x: result.pose.x,
            y: result.pose.y,
            radian: result.pose.heading,
            landmark: result.landmark.unwrap_or_else(|| NO_LANDMARK.to_string()),
        }))
    }

    /// `estimate_x,estimate_y,source_flag`. Moves halfway to the estimate.
    ///
    /// With `source_flag = true` the estimate is in floor-cell coordinates
    /// and is converted into position units first.
    pub fn update(&mut self, client: SocketAddr, payload: &str) -> Result<Reply> {
        let [x, y, flag] = parse_row(payload, "update")?;
        let (mut ex, mut ey) = (x.parse_f64()?, y.parse_f64()?);
        if parse_flag(flag)? {
            (ex, ey) = self.localizer.floor_plan().from_floor(ex, ey);
        }

        let session = self
            .sessions
            .entry(client)
            .or_insert_with(|| self.template.create());
        session.pose = session.pose.midpoint(ex, ey);

        let pose = session.pose;
        let landmark = self
            .localizer
            .floor_plan()
            .landmark_at(pose.x, pose.y)
            .map(str::to_owned);
        session
            .trajectory
            .push(TrajectoryRecord::new(pose, landmark, true));

        log::debug!(
            "{}: fused estimate ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            client,
            ex,
            ey,
            pose.x,
            pose.y
        );

        Ok(Reply::Update(UpdateReply {
            x: pose.x,
            y: pose.y,
            radian: pose.heading,
        }))
    }

    /// Write the trajectory and release the session.
    ///
    /// `Ack(false)` when `client` has no session or the file cannot be
    /// written; in the latter case the session is kept for a retry.
    pub fn end(&mut self, client: SocketAddr) -> Reply {
        let Some(session) = self.sessions.get(&client) else {
            log::warn!("{}: end without a session", client);
            return Reply::Ack(false);
        };

        match session
            .trajectory
            .save(&self.output_dir, client, Local::now())
        {
            Ok(path) => {
                self.sessions.remove(&client);
                log::info!(
                    "{}: session ended, trajectory in {} ({} open sessions)",
                    client,
                    path.display(),
                    self.sessions.len()
                );
                Reply::Ack(true)
            }
            Err(e) => {
                log::error!("{}: failed to write trajectory: {}", client, e);
                Reply::Ack(false)
            }
        }
    }
}

/// Trimmed field of a payload row
struct Field<'a>(&'a str);

impl Field<'_> {
    fn parse_f64(&self) -> Result<f64> {
        self.0
            .parse()
            .map_err(|_| ServerError::Protocol(format!("'{}' is not a number", self.0)))
    }
}

/// First row of `payload` with three comma-separated fields whose leading
/// field is numeric. Earlier non-numeric rows are taken as headers.
fn parse_row<'a>(payload: &'a str, channel: &str) -> Result<[Field<'a>; 3]> {
    for line in payload.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.first().is_some_and(|f| f.parse::<f64>().is_err()) {
            log::trace!("{} payload: skipping header '{}'", channel, line);
            continue;
        }
        let &[a, b, c] = fields.as_slice() else {
            return Err(ServerError::Protocol(format!(
                "{} payload needs 3 fields, got {}",
                channel,
                fields.len()
            )));
        };
        return Ok([Field(a), Field(b), Field(c)]);
    }
    Err(ServerError::Protocol(format!("empty {} payload", channel)))
}

fn parse_flag(field: Field<'_>) -> Result<bool> {
    match field.0 {
        f if f.eq_ignore_ascii_case("true") || f == "1" => Ok(true),
        f if f.eq_ignore_ascii_case("false") || f == "0" => Ok(false),
        other => Err(ServerError::Protocol(format!(
            "'{}' is not a boolean flag",
            other
        ))),
    }
}
