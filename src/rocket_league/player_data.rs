use super::physics_object::PhysicsObject;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerData {
    pub car_id: u32,
    pub team_num: u8,
    pub match_goals: u32,
    pub boost_amount: f32,
    pub on_ground: bool,
    pub has_flip: bool,
    pub is_demoed: bool,
    pub ball_touched: bool,
    pub car_data: PhysicsObject,
    pub inverted_car_data: PhysicsObject,
}

impl PlayerData {
    pub fn new(car_id: u32, team_num: u8, car_data: PhysicsObject) -> Self {
        PlayerData {
            car_id,
            team_num,
            match_goals: 0,
            boost_amount: 0.0,
            on_ground: true,
            has_flip: true,
            is_demoed: false,
            ball_touched: false,
            inverted_car_data: car_data.inverted(),
            car_data,
        }
    }

    pub fn car(&self, inverted: bool) -> &PhysicsObject {
        if inverted {
            &self.inverted_car_data
        } else {
            &self.car_data
        }
    }
}
